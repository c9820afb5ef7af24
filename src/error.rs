use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexiconError>;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// A dictionary, stopword, corpus or test-set file could not be opened.
    #[error("{}: file not found ! ({})", .path.display(), .source)]
    MissingResource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid parameters: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("token cache: {0}")]
    Cache(#[from] bincode::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl LexiconError {
    pub fn missing(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LexiconError::MissingResource { path: path.into(), source }
    }
}
