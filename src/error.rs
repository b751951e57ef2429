#[cfg(feature = "error-track_caller")]
use core::panic::Location;

/// The Kind of Error
///
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An Error that does not fall into any other category.
    Other,
    /// The requested algorithm or operation is not available in this build.
    Unsupported,
    /// A keyed digest was used without a (non-empty) key.
    ///
    /// This is a programming error rather than a data error, and is reported before any input is consumed.
    KeyRequired,
    Interrupted,
    TimedOut,
    PermissionDenied,
    InvalidInput,
    UnexpectedEof,
    WouldBlock,
    InvalidData,

    #[doc(hidden)]
    __Uncategorized,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::Other => f.write_str("Other Error"),
            ErrorKind::Unsupported => f.write_str("Unsupported Operation"),
            ErrorKind::KeyRequired => f.write_str("Key Required"),
            ErrorKind::Interrupted => f.write_str("Interrupted"),
            ErrorKind::TimedOut => f.write_str("Timed Out"),
            ErrorKind::PermissionDenied => f.write_str("Permission Denied"),
            ErrorKind::InvalidInput => f.write_str("Invalid Input"),
            ErrorKind::InvalidData => f.write_str("Invalid Data"),
            ErrorKind::UnexpectedEof => f.write_str("Unexpected End of File"),
            ErrorKind::WouldBlock => f.write_str("Operation would Block"),
            ErrorKind::__Uncategorized => f.write_str("(uncategorized error)"),
        }
    }
}

#[derive(Debug)]
enum ErrorInner {
    None,
    Message(&'static str),
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

/// The type of errors returned from this library.
///
/// ## Traits
/// The type implements [`core::error::Error`].
///
#[cfg_attr(
    feature = "std",
    doc = "When the `std` feature is available, [`From<std::io::Error>`] is implemented, as well as the reciprocal impl. An I/O error is carried verbatim and handed back unchanged by the reciprocal conversion."
)]
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: ErrorInner,
    #[cfg(feature = "error-track_caller")]
    #[allow(dead_code)] // Only used by `Debug`
    error_location: &'static Location<'static>,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)?;

        match &self.inner {
            ErrorInner::None => Ok(()),
            ErrorInner::Message(msg) => {
                f.write_str(": ")?;
                f.write_str(msg)
            }
            #[cfg(feature = "std")]
            ErrorInner::Io(inner) => {
                f.write_str(": ")?;
                core::fmt::Display::fmt(inner, f)
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.inner {
            #[cfg(feature = "std")]
            ErrorInner::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Error {
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    fn from_kind_and_payload(kind: ErrorKind, inner: ErrorInner) -> Self {
        Self {
            kind,
            inner,
            #[cfg(feature = "error-track_caller")]
            error_location: Location::caller(),
        }
    }

    /// Constructs a new error with the specified `kind` and the specified `msg`.
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    pub fn new_with_message(kind: ErrorKind, msg: &'static str) -> Self {
        Self::from_kind_and_payload(kind, ErrorInner::Message(msg))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message associated with this [`Error`], if it was constructed with one.
    pub fn message(&self) -> Option<&'static str> {
        match self.inner {
            ErrorInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the I/O error this [`Error`] was converted from, if any.
    #[cfg(feature = "std")]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match &self.inner {
            ErrorInner::Io(inner) => Some(inner),
            _ => None,
        }
    }

    /// Unwraps the I/O error this [`Error`] was converted from.
    ///
    /// Returns `self` if the error did not originate from an I/O operation.
    #[cfg(feature = "std")]
    pub fn into_io_error(self) -> core::result::Result<std::io::Error, Self> {
        match self.inner {
            ErrorInner::Io(inner) => Ok(inner),
            inner => Err(Self { inner, ..self }),
        }
    }
}

impl From<ErrorKind> for Error {
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    fn from(value: ErrorKind) -> Self {
        Error::from_kind_and_payload(value, ErrorInner::None)
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl From<std::io::ErrorKind> for ErrorKind {
    fn from(value: std::io::ErrorKind) -> Self {
        match value {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidInput => ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => ErrorKind::Unsupported,
            std::io::ErrorKind::UnexpectedEof => ErrorKind::UnexpectedEof,
            std::io::ErrorKind::WouldBlock => ErrorKind::WouldBlock,
            std::io::ErrorKind::Other => ErrorKind::Other,
            _ => ErrorKind::__Uncategorized,
        }
    }
}

#[cfg(feature = "std")]
impl From<ErrorKind> for std::io::ErrorKind {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::Unsupported => Self::Unsupported,
            ErrorKind::Interrupted => Self::Interrupted,
            ErrorKind::TimedOut => Self::TimedOut,
            ErrorKind::PermissionDenied => Self::PermissionDenied,
            ErrorKind::InvalidInput | ErrorKind::KeyRequired => Self::InvalidInput,
            ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            ErrorKind::WouldBlock => Self::WouldBlock,
            ErrorKind::InvalidData => Self::InvalidData,
            ErrorKind::Other | ErrorKind::__Uncategorized => Self::Other,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    fn from(value: std::io::Error) -> Self {
        let kind: ErrorKind = value.kind().into();

        Self::from_kind_and_payload(kind, ErrorInner::Io(value))
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind: std::io::ErrorKind = value.kind.into();

        match value.inner {
            ErrorInner::Io(inner) => inner,
            ErrorInner::Message(msg) => Self::new(kind, msg),
            ErrorInner::None => Self::from(kind),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::{Error, ErrorKind};

    #[test]
    pub fn test_io_error_roundtrip_is_verbatim() {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "source stalled");
        let err = Error::from(err);
        assert_eq!(err.kind(), ErrorKind::TimedOut);
        assert_eq!(err.io_error().unwrap().to_string(), "source stalled");

        let back = std::io::Error::from(err);
        assert_eq!(back.kind(), std::io::ErrorKind::TimedOut);
        assert_eq!(back.to_string(), "source stalled");
    }

    #[test]
    pub fn test_display_with_message() {
        let err = Error::new_with_message(ErrorKind::KeyRequired, "no key");
        assert_eq!(err.to_string(), "Key Required: no key");
        assert_eq!(err.message(), Some("no key"));
    }

    #[test]
    pub fn test_into_io_error_rejects_non_io() {
        let err = Error::from(ErrorKind::Unsupported);
        let err = err.into_io_error().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
