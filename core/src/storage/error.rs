use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, self::Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot create dir '{0}': {1}")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("Cannot read credential store '{0}': {1}")]
    ReadStore(PathBuf, #[source] io::Error),

    #[error("Cannot write credential store '{0}': {1}")]
    WriteStore(PathBuf, #[source] io::Error),

    #[error("Cannot erase credential store '{0}': {1}")]
    EraseStore(PathBuf, #[source] io::Error),

    #[error("Cannot serialize credentials to JSON (dest='{0}'): {1}")]
    SerializeToJson(PathBuf, #[source] serde_json::Error),

    #[error("Cannot deserialize credentials from JSON (src='{0}'): {1}")]
    DeserializeFromJson(PathBuf, #[source] serde_json::Error),
}
