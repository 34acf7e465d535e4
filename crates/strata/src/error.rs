use crate::graph::{GraphError, NodeId, TagError};

pub type Result<T> = std::result::Result<T, LayoutError>;

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Tag(#[from] TagError),

    /// The ranking worklist ran dry before every node was ranked, i.e. the classifier left a
    /// cycle behind.
    #[error("ranking stalled after {visited} of {total} nodes")]
    RankingStalled { visited: usize, total: usize },

    #[error("node {node:?} was never ranked")]
    UnrankedNode { node: NodeId },

    #[error("node {node:?} has an invalid size {width} x {height}")]
    InvalidNodeSize {
        node: NodeId,
        width: f64,
        height: f64,
    },

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    /// `message` already names the position; `line` and `column` are 1-based, or 0 when the
    /// input was an in-memory JSON value.
    #[error("failed to parse layout config: {message}")]
    ConfigParse {
        message: String,
        line: usize,
        column: usize,
    },
}
