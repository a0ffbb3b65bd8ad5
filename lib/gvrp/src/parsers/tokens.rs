use crate::{Error, ErrorKind, Position};
use super::common::{self, whole};

/// A whitespace-delimited token and its byte offset in the source.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
  pub text: &'a str,
  pub offset: usize,
}

/// Forward-only cursor over the whitespace-delimited tokens of an instance file.
///
/// Every typed read consumes exactly one token.  There is no pushback: a failed read leaves
/// the cursor after the offending token and the caller is expected to give up.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
  src: &'a str,
  rest: &'a str,
  last: Option<usize>,
}

impl<'a> TokenReader<'a> {
  pub fn new(src: &'a str) -> Self {
    TokenReader { src, rest: src, last: None }
  }

  fn offset_of(&self, s: &str) -> usize {
    s.as_ptr() as usize - self.src.as_ptr() as usize
  }

  /// Line and column of the byte at `offset`.
  pub fn position_at(&self, offset: usize) -> Position {
    let before = &self.src[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Position {
      line: before.matches('\n').count() + 1,
      column: before[line_start..].chars().count() + 1,
    }
  }

  /// Position of the most recently read token, or of the cursor if nothing was read yet.
  pub fn position(&self) -> Position {
    self.position_at(self.last.unwrap_or_else(|| self.offset_of(self.rest)))
  }

  /// An error located at the most recently read token.
  pub fn error(&self, kind: ErrorKind, detail: impl Into<String>) -> Error {
    Error::at(kind, self.position(), detail)
  }

  pub fn is_at_end(&self) -> bool {
    self.rest.trim_start().is_empty()
  }

  /// Next token, or `None` at a clean end of input.
  pub fn next_token(&mut self) -> Option<Token<'a>> {
    match common::token::<()>(self.rest) {
      Ok((rest, text)) => {
        self.rest = rest;
        let offset = self.offset_of(text);
        self.last = Some(offset);
        Some(Token { text, offset })
      }
      Err(_) => {
        self.rest = &self.rest[self.rest.len()..];
        None
      }
    }
  }

  pub fn read_token(&mut self) -> Result<Token<'a>, Error> {
    match self.next_token() {
      Some(t) => Ok(t),
      None => Err(Error::at(
        ErrorKind::UnexpectedEndOfInput,
        self.position_at(self.src.len()),
        "expected another token",
      )),
    }
  }

  pub fn read_literal(&mut self, expected: &str) -> Result<(), Error> {
    let t = self.read_token()?;
    if t.text == expected {
      Ok(())
    } else {
      Err(self.error(ErrorKind::MalformedToken, format!("expected `{}`, found `{}`", expected, t.text)))
    }
  }

  fn read_with<O>(&mut self, what: &str, parser: impl FnMut(&'a str) -> nom::IResult<&'a str, O, ()>) -> Result<O, Error> {
    let t = self.read_token()?;
    whole(t.text, parser)
      .ok_or_else(|| self.error(ErrorKind::MalformedToken, format!("expected {}, found `{}`", what, t.text)))
  }

  pub fn read_uint(&mut self) -> Result<u32, Error> {
    self.read_with("an unsigned integer", common::u32_)
  }

  pub fn read_int(&mut self) -> Result<i32, Error> {
    self.read_with("an integer", common::i32_)
  }

  /// Like [`read_uint`](Self::read_uint), but also accepts `-1`, returned as
  /// [`SET_TERMINATOR`](common::SET_TERMINATOR).
  pub fn read_uint_or_terminator(&mut self) -> Result<u32, Error> {
    self.read_with("an unsigned integer or -1", common::u32_or_terminator)
  }

  /// Reads `KEY : <token>`.
  pub fn read_key_value(&mut self, key: &str) -> Result<Token<'a>, Error> {
    self.read_literal(key)?;
    self.read_literal(":")?;
    self.read_token()
  }

  /// Reads `KEY : <uint>`.
  pub fn read_key_value_uint(&mut self, key: &str) -> Result<u32, Error> {
    self.read_literal(key)?;
    self.read_literal(":")?;
    self.read_uint()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokens_and_end() {
    let mut r = TokenReader::new("  NAME :\n\tfoo  \n");
    assert_eq!(r.next_token().map(|t| t.text), Some("NAME"));
    assert_eq!(r.next_token().map(|t| t.text), Some(":"));
    assert!(!r.is_at_end());
    let foo = r.next_token().unwrap();
    assert_eq!(foo.text, "foo");
    assert_eq!(r.position_at(foo.offset), Position { line: 2, column: 2 });
    assert!(r.is_at_end());
    assert_eq!(r.next_token(), None);
    assert_eq!(r.read_token().unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
  }

  #[test]
  fn literals() {
    let mut r = TokenReader::new("COMMENT GVRP");
    r.read_literal("COMMENT").unwrap();
    let e = r.read_literal("CVRP").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::MalformedToken);
    assert_eq!(e.position(), Some(Position { line: 1, column: 9 }));
  }

  #[test]
  fn literal_is_case_sensitive() {
    let mut r = TokenReader::new("gvrp");
    assert_eq!(r.read_literal("GVRP").unwrap_err().kind(), ErrorKind::MalformedToken);
  }

  #[test]
  fn numbers() {
    let mut r = TokenReader::new("12 -3 -1 x");
    assert_eq!(r.read_uint(), Ok(12));
    assert_eq!(r.read_int(), Ok(-3));
    assert_eq!(r.read_uint_or_terminator(), Ok(common::SET_TERMINATOR));
    assert_eq!(r.read_uint().unwrap_err().kind(), ErrorKind::MalformedToken);
    assert_eq!(r.read_uint().unwrap_err().kind(), ErrorKind::UnexpectedEndOfInput);
  }

  #[test]
  fn negative_is_not_unsigned() {
    let mut r = TokenReader::new("-1");
    assert_eq!(r.read_uint().unwrap_err().kind(), ErrorKind::MalformedToken);
  }

  #[test]
  fn key_values() {
    let mut r = TokenReader::new("DIMENSION : 32\nVEHICLES : 5\nNAME : A-n32");
    assert_eq!(r.read_key_value_uint("DIMENSION"), Ok(32));
    assert_eq!(r.read_key_value_uint("VEHICLES"), Ok(5));
    assert_eq!(r.read_key_value("NAME").map(|t| t.text), Ok("A-n32"));
  }

  #[test]
  fn key_value_requires_colon_token() {
    let mut r = TokenReader::new("DIMENSION: 32");
    let e = r.read_key_value_uint("DIMENSION").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::MalformedToken);
    assert_eq!(e.position(), Some(Position { line: 1, column: 1 }));
  }

  #[test]
  fn end_of_input_points_past_last_token() {
    let mut r = TokenReader::new("VEHICLES :\n");
    let e = r.read_key_value_uint("VEHICLES").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::UnexpectedEndOfInput);
    assert_eq!(e.position(), Some(Position { line: 2, column: 1 }));
  }
}
