use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Input ended inside block {block} (missing !END)")]
    UnterminatedBlock { block: String },
}

pub type Result<T> = std::result::Result<T, DialogueError>;
