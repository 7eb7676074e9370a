//! Error types for the parse adapter.

use clap::error::ErrorKind;

use crate::shape::Shape;

/// Errors produced while validating, building or running a parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration type is not a plain struct.
    #[error("{type_name} must be a struct ({shape} is not supported)")]
    InvalidType {
        /// The offending type.
        type_name: &'static str,
        /// What the type was classified as instead.
        shape: Shape,
    },

    /// A parser option refused to apply.
    #[error("failed to construct parser: {message}")]
    Construction {
        /// Human-readable error message
        message: String,
        /// The underlying error source, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The arguments did not satisfy the command line's grammar.
    ///
    /// Carries clap's diagnostic verbatim. Help and version requests also end
    /// up here when the exit action does not terminate the process.
    #[error(transparent)]
    Parse(#[from] clap::Error),
}

impl Error {
    /// Creates a construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        Error::Construction {
            message: message.into(),
            source: None,
        }
    }

    /// Sets the source of a construction error. Other variants are returned
    /// unchanged.
    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        match self {
            Error::Construction { message, .. } => Error::Construction {
                message,
                source: Some(source.into()),
            },
            other => other,
        }
    }

    /// The clap error kind, for parse errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.as_parse().map(clap::Error::kind)
    }

    /// The underlying clap error, for parse errors.
    pub fn as_parse(&self) -> Option<&clap::Error> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }

    /// The exit code clap would use for this error.
    ///
    /// Invalid types and construction failures are configuration mistakes
    /// and map to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(err) => err.exit_code(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_type_display() {
        let err = Error::InvalidType {
            type_name: "alloc::boxed::Box<app::Cli>",
            shape: Shape::Pointer,
        };
        assert_eq!(
            err.to_string(),
            "alloc::boxed::Box<app::Cli> must be a struct (pointer is not supported)"
        );
        assert_eq!(err.exit_code(), 1);
        assert!(err.kind().is_none());
    }

    #[test]
    fn test_construction_with_source() {
        let err = Error::construction("bad name").with_source("empty string");
        assert_eq!(err.to_string(), "failed to construct parser: bad name");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("empty string".to_string())
        );
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let clap_err = clap::Command::new("app")
            .try_get_matches_from(["app", "--bogus"])
            .unwrap_err();
        let expected = clap_err.to_string();

        let err = Error::from(clap_err);
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.kind(), Some(ErrorKind::UnknownArgument));
        assert_eq!(err.exit_code(), 2);
    }
}
