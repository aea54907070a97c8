use navpath_core::edge::TAG_FIELD;
use navpath_core::{convert, decode_path, encode_path, Edge, NativeLookup, ProtocolError, Tile, WebVertex};
use serde_json::{json, Value};

struct NoHost;

impl NativeLookup for NoHost {
    type Spell = ();

    fn object_name(&self, _object_id: i32) -> Option<String> {
        None
    }

    fn spell(&self, _constant: &str) -> Option<()> {
        Some(())
    }
}

#[test]
fn step_door_step_keeps_order_through_decode_and_convert() {
    let body = json!([
        {"type": "Step", "position": {"x": 3200, "y": 3200, "plane": 0}},
        {"type": "Door", "position": {"x": 3201, "y": 3200, "plane": 0}, "id": 1535, "action": "Open"},
        {"type": "Step", "position": {"x": 3202, "y": 3200, "plane": 0}}
    ])
    .to_string();
    let path = decode_path(body.as_bytes()).unwrap();
    assert_eq!(
        path,
        vec![
            Edge::Step { position: Tile::new(3200, 3200, 0) },
            Edge::Door { position: Tile::new(3201, 3200, 0), id: 1535, action: "Open".into() },
            Edge::Step { position: Tile::new(3202, 3200, 0) },
        ]
    );

    let web = convert(&path, &NoHost).unwrap();
    let positions: Vec<Tile> = web
        .vertices
        .iter()
        .map(|v| match v {
            WebVertex::Coordinate { position } | WebVertex::Object { position, .. } => *position,
            other => panic!("unexpected vertex {other:?}"),
        })
        .collect();
    assert_eq!(positions, vec![Tile::new(3200, 3200, 0), Tile::new(3201, 3200, 0), Tile::new(3202, 3200, 0)]);
}

#[test]
fn encoded_path_decodes_identically() {
    let path = vec![
        Edge::ItemTeleport { item: "Ring of dueling(8)".into(), action: "Rub".into() },
        Edge::Step { position: Tile::new(2440, 3090, 0) },
        Edge::GameObjectEdge { position: Tile::new(2441, 3090, 0), id: 4387, action: "Join".into() },
        Edge::Step { position: Tile::new(2440, 3090, 0) },
        Edge::SpellTeleport { spell: "Camelot Teleport".into() },
    ];
    let wire = encode_path(&path).unwrap();
    let v: Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(v[2][TAG_FIELD], json!("GameObject"));
    assert_eq!(decode_path(wire.as_bytes()).unwrap(), path);
}

#[test]
fn extra_fields_from_the_server_are_ignored() {
    let body = br#"[{"type":"SpellTeleport","spell":"Varrock Teleport","cost":12}]"#;
    assert_eq!(decode_path(body).unwrap(), vec![Edge::SpellTeleport { spell: "Varrock Teleport".into() }]);
}

#[test]
fn corrupt_edge_discards_whole_response() {
    let body = json!([
        {"type": "Step", "position": {"x": 1, "y": 1, "plane": 0}},
        {"type": "Step", "position": {"x": 2, "y": 1, "plane": 0}},
        {"type": "Door", "position": {"x": 3, "y": 1}, "id": 5, "action": "Open"}
    ])
    .to_string();
    match decode_path(body.as_bytes()) {
        Err(ProtocolError::MalformedEdge { index, .. }) => assert_eq!(index, Some(2)),
        other => panic!("expected malformed edge, got {other:?}"),
    }
}

#[test]
fn empty_array_is_an_empty_path() {
    assert!(decode_path(b"[]").unwrap().is_empty());
}
