pub mod errors;
pub mod json;
pub mod models;
pub mod pattern;
pub mod edge;
pub mod skill;
pub mod state;
pub mod convert;
pub mod host;

pub use edge::{decode_path, encode_path, Edge, EdgeKind};
pub use errors::{ConvertError, ProtocolError, SnapshotError};
pub use models::{DataSelection, GameState, PathGenerationRequest, Tile};
pub use pattern::ItemPattern;
pub use skill::Skill;
pub use state::{GameStateSource, HeldItem, ItemMerge, SnapshotBuilder};
pub use convert::{convert, NativeLookup, WebPath, WebVertex};
pub use host::StaticGame;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
