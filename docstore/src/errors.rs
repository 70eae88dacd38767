use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic, ReadExecutor};

/// Error kinds for docstore operations.
///
/// Each kind describes a specific category of failure, enabling precise error
/// handling at call sites.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{ErrorKind, StoreError, StoreResult};
///
/// fn example() -> StoreResult<()> {
///     Err(StoreError::new("collection not found", ErrorKind::CollectionNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Collection and store errors
    /// A collection configuration is absent or names no primary key
    ConfigMissing,
    /// A collection with the same name already exists
    CollectionAlreadyExists,
    /// The requested collection does not exist
    CollectionNotFound,
    /// A document's primary-key field is missing or not a string
    UnsupportedField,

    // Marshal/unmarshal errors
    /// A null or wrong-shaped argument was given to the engine
    NilOrInvalidInput,
    /// A value kind that cannot be represented in a document
    UnsupportedKind,
    /// A document field's type disagrees with the destination's type
    TypeMismatch,
    /// A fixed-size destination and a stored array differ in length
    LengthMismatch,
    /// A stored number does not fit the destination's numeric type
    ConversionError,

    // Persistence errors
    /// Encoding the store to bytes failed
    EncodeError,
    /// Decoding a store from bytes failed
    DecodeError,

    // IO errors
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for a file operation
    PermissionDenied,

    // Operation errors
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConfigMissing => write!(f, "Config missing"),
            ErrorKind::CollectionAlreadyExists => write!(f, "Collection already exists"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::UnsupportedField => write!(f, "Unsupported field"),
            ErrorKind::NilOrInvalidInput => write!(f, "Nil or invalid input"),
            ErrorKind::UnsupportedKind => write!(f, "Unsupported kind"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::LengthMismatch => write!(f, "Length mismatch"),
            ErrorKind::ConversionError => write!(f, "Conversion error"),
            ErrorKind::EncodeError => write!(f, "Encode error"),
            ErrorKind::DecodeError => write!(f, "Decode error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom docstore error type.
///
/// `StoreError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{ErrorKind, StoreError};
///
/// // Create a simple error
/// let err = StoreError::new("collection not found", ErrorKind::CollectionNotFound);
///
/// // Create an error with a cause
/// let cause = StoreError::new("IO failed", ErrorKind::IOError);
/// let err = StoreError::new_with_cause("dump failed", ErrorKind::EncodeError, cause);
/// ```
#[derive(Clone)]
pub struct StoreError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<StoreError>>,
    backtrace: Atomic<Backtrace>,
}

impl StoreError {
    /// Creates a new `StoreError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        StoreError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `StoreError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: StoreError) -> Self {
        StoreError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&StoreError> {
        self.cause.as_deref()
    }

    /// Wraps this error with the name of the field that failed, keeping the
    /// original error as the cause.
    ///
    /// Nested failures chain into a readable path:
    /// `field 'outer': field 'inner': expected string, found number`.
    pub fn with_field(self, field: &str) -> StoreError {
        let message = format!("field '{}': {}", field, self.message);
        let kind = self.error_kind.clone();
        StoreError::new_with_cause(&message, kind, self)
    }

    /// Wraps this error with the index of the array element that failed.
    pub fn with_index(self, index: usize) -> StoreError {
        let message = format!("array element {}: {}", index, self.message);
        let kind = self.error_kind.clone();
        StoreError::new_with_cause(&message, kind, self)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => {
                writeln!(f, "{}", self.message)?;
                self.backtrace.read_with(|bt| write!(f, "{:?}", bt))
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docstore operations.
///
/// `StoreResult<T>` is shorthand for `Result<T, StoreError>`. All fallible
/// docstore operations return this type.
pub type StoreResult<T> = Result<T, StoreError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        StoreError::new(&format!("IO error: {}", err), error_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = StoreError::new("collection not found", ErrorKind::CollectionNotFound);
        assert_eq!(err.message(), "collection not found");
        assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_error_with_cause() {
        let cause = StoreError::new("disk unplugged", ErrorKind::IOError);
        let err = StoreError::new_with_cause("dump failed", ErrorKind::EncodeError, cause);
        assert_eq!(err.kind(), &ErrorKind::EncodeError);
        let cause = err.cause().unwrap();
        assert_eq!(cause.message(), "disk unplugged");
    }

    #[test]
    fn test_display_shows_message_only() {
        let err = StoreError::new("bad input", ErrorKind::NilOrInvalidInput);
        assert_eq!(format!("{}", err), "bad input");
    }

    #[test]
    fn test_with_field_builds_path() {
        let err = StoreError::new("expected string, found number", ErrorKind::TypeMismatch)
            .with_field("name")
            .with_field("author");
        assert_eq!(
            err.message(),
            "field 'author': field 'name': expected string, found number"
        );
        assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
        // the original error survives at the bottom of the chain
        let root = err.cause().unwrap().cause().unwrap();
        assert_eq!(root.message(), "expected string, found number");
    }

    #[test]
    fn test_with_index() {
        let err = StoreError::new("cannot convert 300 to i8", ErrorKind::ConversionError)
            .with_index(2);
        assert_eq!(err.message(), "array element 2: cannot convert 300 to i8");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StoreError::from(io);
        assert_eq!(err.kind(), &ErrorKind::FileNotFound);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = StoreError::from(io);
        assert_eq!(err.kind(), &ErrorKind::PermissionDenied);

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = StoreError::from(io);
        assert_eq!(err.kind(), &ErrorKind::IOError);
    }
}
