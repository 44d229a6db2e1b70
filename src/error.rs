use std::path::PathBuf;

use derive_more::{Display, Error};
use image::ImageError;

#[derive(Debug, Display, Error)]
pub enum DeriveError {
    /// The target size list was empty or contained a zero.
    #[display("invalid target sizes {sizes:?}: expected a non-empty list of positive sizes")]
    InvalidTargetSizes { sizes: Vec<u32> },
    #[display("source icon not found: {}", path.display())]
    SourceNotFound { path: PathBuf },
    #[display("failed to decode source icon {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        source: ImageError,
    },
    #[display("source icon {} is {width}x{height}, expected a square image", path.display())]
    NotSquare {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    /// The source's edge length differs from the largest target size.
    #[display(
        "source icon {} is {actual}x{actual}, expected {expected}x{expected} to match the largest target size",
        path.display()
    )]
    SizeMismatch {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },
    #[display("icon-{size}.png would overwrite the source icon {}", path.display())]
    OverwritesSource { size: u32, path: PathBuf },
    /// Persisting one size failed. Sizes written before it are left on disk.
    #[display("failed to write icon-{size}.png to {}: {source}", path.display())]
    WriteFailure {
        size: u32,
        path: PathBuf,
        source: ImageError,
    },
}

impl DeriveError {
    /// The target size the error refers to, if it is tied to one.
    pub fn size(&self) -> Option<u32> {
        match self {
            Self::OverwritesSource { size, .. } | Self::WriteFailure { size, .. } => Some(*size),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn write_failure_names_the_size() {
        let err = DeriveError::WriteFailure {
            size: 144,
            path: PathBuf::from("icons/icon-144.png"),
            source: ImageError::IoError(io::Error::other("disk full")),
        };
        let message = err.to_string();
        assert!(message.contains("icon-144.png"), "{message}");
        assert!(message.contains("disk full"), "{message}");
        assert_eq!(err.size(), Some(144));
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_source_has_no_cause() {
        let err = DeriveError::SourceNotFound {
            path: PathBuf::from("icons/icon-512.png"),
        };
        assert_eq!(err.to_string(), "source icon not found: icons/icon-512.png");
        assert!(err.source().is_none());
        assert_eq!(err.size(), None);
    }
}
