use thiserror::Error;

/// Interop failures while decoding messages from the navigation server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("malformed edge{}: {reason}", at_index(.index))]
    MalformedEdge { index: Option<usize>, reason: String },
    #[error("unsupported encoding: token is not a regex pattern: {token}")]
    UnsupportedEncoding { token: &'static str },
    #[error("invalid pattern {source_text:?}: {reason}")]
    InvalidPattern { source_text: String, reason: String },
    #[error("malformed data selection: {0}")]
    MalformedSelection(String),
}

impl ProtocolError {
    pub fn malformed(index: Option<usize>, reason: impl ToString) -> Self {
        ProtocolError::MalformedEdge { index, reason: reason.to_string() }
    }
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unknown skill: {0}")]
    UnknownSkill(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unknown spell {spell:?} (edge {index})")]
    UnknownSpell { index: usize, spell: String },
}
