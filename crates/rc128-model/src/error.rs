use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown locale tag: {0}")]
    UnknownLocale(String),
    #[error("unknown {table} code: {code}")]
    UnknownCode { table: &'static str, code: String },
    #[error("invalid node id: {0:?}")]
    InvalidNodeId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
