use navpath_core::{ProtocolError, SnapshotError};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl ClientError {
    /// Failures the caller degrades on instead of propagating. An undecodable
    /// `/select` body counts; bad patterns inside a valid body do not.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_)
                | ClientError::UnexpectedStatus { .. }
                | ClientError::Protocol(ProtocolError::MalformedSelection(_))
        )
    }
}
