pub mod peer;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("resource does not exist")]
    ResourceDoesNotExist,
    #[error("storage backend failure: {0}")]
    Backend(String),
}
