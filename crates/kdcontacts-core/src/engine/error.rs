use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::spatial::SpatialError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read atoms: {source}")]
    Input {
        #[from]
        source: PdbError,
    },

    #[error("Failed to build the k-d tree: {source}")]
    TreeBuild {
        #[from]
        source: SpatialError,
    },

    #[error("Failed to write the contact table: {0}")]
    Output(#[from] csv::Error),
}
