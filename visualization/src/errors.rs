//! Error types for X-bar chart visualization

use thiserror::Error;

/// Result type alias for visualization operations
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Errors that can occur during visualization
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("Invalid chart data: {message}")]
    InvalidData { message: String },

    #[error("Chart rendering failed: {message}")]
    RenderingError { message: String },

    #[error("File I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Layout calculation error: {message}")]
    LayoutError { message: String },

    #[error("Chart JSON could not be parsed: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl<T: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<T>>
    for VisualizationError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        VisualizationError::RenderingError {
            message: format!("Drawing area error: {}", err),
        }
    }
}
