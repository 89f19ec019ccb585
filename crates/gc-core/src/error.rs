use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pixel buffer or animation rejected before any processing.
    #[error("Entrée invalide : {0}")]
    InvalidInput(String),

    /// Degenerate resampling target.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidArgument {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Failure while writing to the output sink.
    #[error("Erreur d'écriture : {0}")]
    Io(#[from] std::io::Error),
}
