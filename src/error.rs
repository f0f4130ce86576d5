use std::io;

/// All error types for the pixel-tiler pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PixelTilerError {
    #[error("Input error: {0}")]
    Input(String),
    #[error("Atlas error: {0}")]
    Atlas(String),
    #[error("Tiling error: {0}")]
    Tiling(String),
    #[error("Output error: {0}")]
    Output(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PixelTilerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_strings() {
        let e = PixelTilerError::Input("bad file".into());
        assert_eq!(e.to_string(), "Input error: bad file");

        let e = PixelTilerError::Atlas("no colors".into());
        assert_eq!(e.to_string(), "Atlas error: no colors");

        let e = PixelTilerError::Tiling("empty image".into());
        assert_eq!(e.to_string(), "Tiling error: empty image");

        let e = PixelTilerError::Output("disk full".into());
        assert_eq!(e.to_string(), "Output error: disk full");

        let e = PixelTilerError::Validation("budget too small".into());
        assert_eq!(e.to_string(), "Validation error: budget too small");
    }

    #[test]
    fn from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let e: PixelTilerError = io_err.into();
        assert!(matches!(e, PixelTilerError::Io(_)));
        assert!(e.to_string().contains("file missing"));
    }
}
