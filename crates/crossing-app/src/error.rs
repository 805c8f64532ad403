use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] crossing_core::error::CoreError),

    #[error(transparent)]
    Schema(#[from] crossing_schema::error::SchemaError),

    #[error("report rendering failed: {0}")]
    Export(#[from] crossing_export::error::ExportError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a report is already being generated")]
    ReportInFlight,
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
