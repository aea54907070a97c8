use std::sync::Arc;

use arc_swap::ArcSwapOption;
use navpath_core::{decode_path, DataSelection, Edge, GameState, GameStateSource, PathGenerationRequest, SnapshotBuilder, Tile};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use tracing::{debug, error, info, info_span};

use crate::config::Config;
use crate::errors::ClientError;

/// Blocking client for the navigation service.
///
/// The server's [`DataSelection`] is fetched once and kept for the life of the
/// client. Transport failures, non-200 responses and an undecodable `/select`
/// body are logged and reported as `Ok(None)`; other protocol mismatches are
/// returned as errors.
pub struct NavClient {
    http: Client,
    config: Config,
    selection: ArcSwapOption<DataSelection>,
}

impl NavClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config, selection: ArcSwapOption::empty() })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `GET /select` without touching the cache.
    pub fn try_fetch_selection(&self) -> Result<DataSelection, ClientError> {
        let resp = self.http.get(self.config.endpoint("/select")).send()?;
        let body = ok_body(resp)?;
        Ok(DataSelection::decode(&body)?)
    }

    /// The cached selection, fetching it on first use.
    pub fn selection(&self) -> Result<Option<Arc<DataSelection>>, ClientError> {
        if let Some(sel) = self.selection.load_full() {
            return Ok(Some(sel));
        }
        let fetched = unavailable_as_none("select", self.try_fetch_selection())?;
        Ok(fetched.map(|sel| {
            let sel = Arc::new(sel);
            info!(
                varps = sel.varps.len(),
                varbits = sel.varbits.len(),
                items = sel.items.len(),
                skills = sel.skills.len(),
                "data selection cached"
            );
            self.selection.store(Some(Arc::clone(&sel)));
            sel
        }))
    }

    /// Drops the cached selection and fetches it again.
    pub fn refresh_selection(&self) -> Result<Option<Arc<DataSelection>>, ClientError> {
        self.selection.store(None);
        self.selection()
    }

    pub fn cached_selection(&self) -> Option<Arc<DataSelection>> {
        self.selection.load_full()
    }

    /// `POST /path` with a prepared request.
    pub fn try_request_path(&self, request: &PathGenerationRequest) -> Result<Vec<Edge>, ClientError> {
        let resp = self.http.post(self.config.endpoint("/path")).json(request).send()?;
        let body = ok_body(resp)?;
        Ok(decode_path(&body)?)
    }

    pub fn request_path(&self, start: Tile, end: Tile, state: &GameState) -> Result<Option<Vec<Edge>>, ClientError> {
        let span = info_span!("request_path", %start, %end);
        let _enter = span.enter();

        let request = PathGenerationRequest { start, end, game_state: state.clone() };
        let path = unavailable_as_none("path", self.try_request_path(&request))?;
        if let Some(edges) = &path {
            info!(edges = edges.len(), "path received");
        }
        Ok(path)
    }

    /// Snapshots `source` against the server's selection (or everything, when
    /// the selection is unavailable) and requests a path.
    pub fn build_between(&self, start: Tile, end: Tile, source: &dyn GameStateSource) -> Result<Option<Vec<Edge>>, ClientError> {
        let selection = self.selection()?;
        if selection.is_none() {
            debug!("no data selection; reporting unrestricted game state");
        }
        let state = SnapshotBuilder::new(self.config.item_merge).build(selection.as_deref(), source)?;
        self.request_path(start, end, &state)
    }
}

fn ok_body(resp: Response) -> Result<Vec<u8>, ClientError> {
    let status = resp.status();
    if status != StatusCode::OK {
        let body = resp.text().unwrap_or_default();
        return Err(ClientError::UnexpectedStatus { status, body });
    }
    Ok(resp.bytes()?.to_vec())
}

fn unavailable_as_none<T>(call: &str, res: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_unavailable() => {
            error!(call, error = %e, "navigation service unavailable");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
