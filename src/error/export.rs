use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error("nothing to export: content is empty")]
    EmptyContent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
