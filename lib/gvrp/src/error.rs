use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
  /// A required argument is missing or does not belong to the receiver.
  InvalidParameter,
  OutOfMemory,
  /// A token is present but is not the expected keyword or number.
  MalformedToken,
  UnexpectedEndOfInput,
  /// A declared index does not match its sequential position.
  IndexMismatch,
  /// A customer or set index lies outside the range declared in the header.
  IndexOutOfRange,
  UnsupportedValue,
  /// A customer is listed more than once in the set section.
  DuplicateAssignment,
  /// A customer is not listed in any set.
  UnassignedCustomer,
  CustomerNotFound,
  /// No instance with that name in a dataset.
  UnknownInstanceName,
  Unexpected,
}

impl ErrorKind {
  fn describe(&self) -> &'static str {
    match self {
      ErrorKind::InvalidParameter => "invalid parameter",
      ErrorKind::OutOfMemory => "out of memory",
      ErrorKind::MalformedToken => "malformed token",
      ErrorKind::UnexpectedEndOfInput => "unexpected end of input",
      ErrorKind::IndexMismatch => "index mismatch",
      ErrorKind::IndexOutOfRange => "index out of range",
      ErrorKind::UnsupportedValue => "unsupported value",
      ErrorKind::DuplicateAssignment => "duplicate set assignment",
      ErrorKind::UnassignedCustomer => "customer without set",
      ErrorKind::CustomerNotFound => "customer not found",
      ErrorKind::UnknownInstanceName => "unknown instance name",
      ErrorKind::Unexpected => "unexpected error",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.describe())
  }
}

/// 1-based line and column of a token in the input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}, column {}", self.line, self.column)
  }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
  kind: ErrorKind,
  position: Option<Position>,
  detail: String,
}

impl Error {
  pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
    Error { kind, position: None, detail: detail.into() }
  }

  pub fn at(kind: ErrorKind, position: Position, detail: impl Into<String>) -> Self {
    Error { kind, position: Some(position), detail: detail.into() }
  }

  pub fn kind(&self) -> ErrorKind { self.kind }

  pub fn position(&self) -> Option<Position> { self.position }

  pub fn detail(&self) -> &str { &self.detail }
}

impl From<ErrorKind> for Error {
  fn from(kind: ErrorKind) -> Self {
    Error::new(kind, String::new())
  }
}

impl From<std::collections::TryReserveError> for Error {
  fn from(e: std::collections::TryReserveError) -> Self {
    Error::new(ErrorKind::OutOfMemory, e.to_string())
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.kind, f)?;
    if let Some(pos) = self.position {
      write!(f, " at {}", pos)?;
    }
    if !self.detail.is_empty() {
      write!(f, ": {}", self.detail)?;
    }
    Ok(())
  }
}

impl std::error::Error for Error {}
