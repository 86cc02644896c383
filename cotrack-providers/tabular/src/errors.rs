use std::io;

use arrow_schema::ArrowError;
use cotrack_core::define_error_codes;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Errors raised while writing exported tables.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TabularExportError {
    /// Writing to the destination failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// An Arrow record batch could not be assembled.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// The Parquet encoder failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

define_error_codes! {
    /// Stable codes describing [`TabularExportError`] variants.
    enum TabularExportErrorCode for TabularExportError {
        /// Writing to the destination failed.
        Io => Io { .. } => "TABULAR_EXPORT_IO",
        /// An Arrow record batch could not be assembled.
        Arrow => Arrow { .. } => "TABULAR_EXPORT_ARROW",
        /// The Parquet encoder failed.
        Parquet => Parquet { .. } => "TABULAR_EXPORT_PARQUET",
    }
}
