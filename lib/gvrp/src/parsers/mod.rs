use std::io::Read;
use std::path::Path;
use anyhow::Context;

use crate::model::Instance;

mod gvrp;
pub use gvrp::parse_gvrp;
#[cfg(test)]
pub(crate) use gvrp::tests::TRIANGLE;

mod tokens;
pub use tokens::{Token, TokenReader};

mod nom_prelude {
  pub use nom::{
    IResult, Parser,
    error::{
      ParseError,
      FromExternalError,
    },
    branch::alt,
    sequence::*,
    combinator::*,
    character::complete::{char, digit1},
    bytes::complete::{tag, take_till1, take_while},
  };
  pub use std::str::FromStr;
  pub use std::num::ParseIntError;
}

pub mod common;
pub use common::SET_TERMINATOR;

pub trait ParseInstance<Fmt>: Sized {
  fn parse(inputs: Fmt) -> crate::Result<Self>;
}

/// A GVRP instance file on disk.
#[derive(Debug, Copy, Clone)]
pub struct GvrpFmt<P>(pub P);

impl<P: AsRef<Path>> ParseInstance<GvrpFmt<P>> for Instance {
  fn parse(input: GvrpFmt<P>) -> crate::Result<Self> {
    let path = input.0.as_ref();
    let data = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read {:?}", path))?;
    let instance = parse_gvrp(&data)
      .with_context(|| format!("failed to parse {:?}", path))?;
    Ok(instance)
  }
}

impl Instance {
  /// Reads the whole of `reader` (a file, stdin, ...) and parses it.
  pub fn from_reader(mut reader: impl Read) -> crate::Result<Self> {
    let mut data = String::new();
    reader.read_to_string(&mut data).context("failed to read instance")?;
    Ok(parse_gvrp(&data)?)
  }
}

impl std::str::FromStr for Instance {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_gvrp(s)
  }
}
