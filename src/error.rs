//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's used across this crate. Validation rules,
//! the dynamic value constructors and the operation kind parser all report their failures using it.

use crate::visit::Path;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message, an optional [Path] pointing at the offending node
/// of a query tree, and a context string. When validation collects multiple errors the context is
/// populated with a list of all violations.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) path: Option<Path>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

/// The kind of name that failed the GraphQL name grammar.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NameKind {
    /// The optional name of an operation, e.g. `Foo` in `query Foo { ... }`
    Operation,
    /// A field's name
    Field,
    /// A field's alias
    Alias,
    /// The name of an argument or of an object value's field
    Argument,
    /// An enum value passed as an argument
    Enum,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Operation => f.write_str("operation name"),
            NameKind::Field => f.write_str("field name"),
            NameKind::Alias => f.write_str("alias"),
            NameKind::Argument => f.write_str("argument name"),
            NameKind::Enum => f.write_str("enum value"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ErrorType {
    /// A dynamically typed value can't be represented by any [`Value`](crate::ast::Value) variant.
    UnsupportedArgumentType,
    /// An operation's kind is unset or isn't one of `query`, `mutation`, or `subscription`.
    InvalidOperationType,
    /// A name doesn't match `/^[_A-Za-z][_0-9A-Za-z]*$/`.
    InvalidName(NameKind),
    /// A reserved field slot was never filled.
    MissingField,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::UnsupportedArgumentType => f.write_str("Unsupported Argument Type"),
            ErrorType::InvalidOperationType => f.write_str("Invalid Operation Type"),
            ErrorType::InvalidName(_) => f.write_str("Invalid Name"),
            ErrorType::MissingField => f.write_str("Missing Field"),
        }
    }
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: ErrorType) -> Self {
        Self {
            message: message.into(),
            path: None,
            context: None,
            error_type,
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        path: Option<Path>,
        context: S,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            path,
            context: Some(context.into()),
            error_type,
        }
    }

    /// Attach the location of the node that caused this error.
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the path to the node that caused this error, if it's known.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Returns the context of the current error, which lists all violations of an aggregated
    /// validation error.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.path {
            Some(ref path) if !path.segments.is_empty() => {
                format!("{} Error: {} (at {})", self.error_type, self.message, path)
            }
            _ => format!("{} Error: {}", self.error_type, self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}
