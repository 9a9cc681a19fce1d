//! Asset error types
//!
//! Provides error handling for model and texture loading, caching and reload.

use std::io;
use std::fmt;

use crate::obj::ObjError;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid file format, bad OBJ/MTL data)
    Parse(String),
    /// Image decoding error
    Image(image::ImageError),
    /// Asset not found in the cache
    NotFound(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Parse(msg) => write!(f, "Asset parse error: {}", msg),
            AssetError::Image(err) => write!(f, "Asset image error: {}", err),
            AssetError::NotFound(path) => write!(f, "Asset not found: {}", path),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            AssetError::Image(err) => Some(err),
            AssetError::Parse(_) => None,
            AssetError::NotFound(_) => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Image(err)
    }
}

impl From<ObjError> for AssetError {
    fn from(err: ObjError) -> Self {
        match err {
            ObjError::Io(io_err) => AssetError::Io(io_err),
            other => AssetError::Parse(other.to_string()),
        }
    }
}

impl From<String> for AssetError {
    fn from(msg: String) -> Self {
        AssetError::Parse(msg)
    }
}

impl From<&str> for AssetError {
    fn from(msg: &str) -> Self {
        AssetError::Parse(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let msg = format!("{}", AssetError::Io(io_err));
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn test_not_found_error_display() {
        let err = AssetError::NotFound("models/airplane.obj".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("models/airplane.obj"));
    }

    #[test]
    fn test_from_obj_parse_error_keeps_line() {
        let err: AssetError = ObjError::InvalidIndex { line: 7, index: 42 }.into();
        match err {
            AssetError::Parse(msg) => assert!(msg.contains("line 7"), "got {}", msg),
            other => panic!("Expected Parse variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_obj_io_error_stays_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: AssetError = ObjError::Io(io_err).into();
        match err {
            AssetError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("Expected Io variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_str() {
        let asset_err: AssetError = "bad data".into();
        match asset_err {
            AssetError::Parse(msg) => assert_eq!(msg, "bad data"),
            _ => panic!("Expected Parse variant"),
        }
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(AssetError::Io(io_err).source().is_some());
        assert!(AssetError::Parse("bad".to_string()).source().is_none());
        assert!(AssetError::NotFound("path".to_string()).source().is_none());
    }
}
