use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the metadata file: {0}")]
    MetadataFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the metadata file as JSON: {0}")]
    MetadataDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize artifacts to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
