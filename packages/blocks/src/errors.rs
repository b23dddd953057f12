//! Error types for block kinds

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Block kind \"{0}\" is not registered")]
    UnregisteredKind(String),

    #[error("Unsupported field path \"{0}\": expected style.<key> or props.<key>")]
    UnsupportedPath(String),

    #[error("Field \"{path}\" is not editable on {kind} blocks")]
    UnknownField { kind: String, path: String },
}
