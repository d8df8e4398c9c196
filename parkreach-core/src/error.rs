use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Source node {0} does not exist in the walking graph")]
    InvalidSource(NodeId),
    #[error("Empty input: no {0} provided")]
    EmptyInput(&'static str),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
