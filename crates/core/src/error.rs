use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("lookup tables missing: {0}")]
    MissingTables(String),
    #[error("read {path}: {message}")]
    Read { path: String, message: String },
}

impl SummaryError {
    pub fn read(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
