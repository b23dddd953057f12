//! Error types for the editor

use missive_blocks::BlockError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No registered container kind can host the document root")]
    MissingContainer,

    #[error("Root block not found: {0}")]
    RootNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Block error: {0}")]
    Block(#[from] BlockError),
}
