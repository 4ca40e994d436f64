//! Errors that occur while reading font data

/// An error that occurs when reading font data.
///
/// All of these are recoverable: a failed parse attempt degrades the
/// record to `Unknown` or `Unreadable` and the caller moves on. None of
/// them should ever abort a directory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// Fewer bytes remained than the requested read required.
    TruncatedData,
    /// No recognized signature at the start of the data.
    UnsupportedFormat,
    /// The underlying file could not be opened or read.
    Inaccessible,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::TruncatedData => write!(f, "Not enough bytes remain for the read"),
            ReadError::UnsupportedFormat => write!(f, "No recognized font signature"),
            ReadError::Inaccessible => write!(f, "The file could not be read"),
        }
    }
}

impl std::error::Error for ReadError {}
