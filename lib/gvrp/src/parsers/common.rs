use super::nom_prelude::*;

/// Terminates a customer list in the set section.  Written as `-1` in the file and read as an
/// unsigned value, so it is the all-ones bit pattern.
pub const SET_TERMINATOR: u32 = u32::MAX;

pub fn u32_<'a, E>(input: &'a str) -> IResult<&'a str, u32, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>
{
  map_res(digit1, u32::from_str)(input)
}

pub fn i32_<'a, E>(input: &'a str) -> IResult<&'a str, i32, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>
{
  map_res(
    recognize(
      pair(
        opt(char('-')),
        digit1
      )
    ), i32::from_str)(input)
}

/// An unsigned value, or `-1` read as [`SET_TERMINATOR`].
pub fn u32_or_terminator<'a, E>(input: &'a str) -> IResult<&'a str, u32, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>
{
  alt((
    value(SET_TERMINATOR, all_consuming(tag("-1"))),
    u32_,
  ))(input)
}

/// Whitespace-delimited token, skipping leading whitespace.
pub fn token<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
  where
    E: ParseError<&'a str>
{
  preceded(
    take_while(char::is_whitespace),
    take_till1(char::is_whitespace),
  )(input)
}

/// Runs `parser` over a whole token, failing if anything is left over.
pub fn whole<'a, O, F>(text: &'a str, parser: F) -> Option<O>
  where
    F: Parser<&'a str, O, ()>
{
  all_consuming(parser)(text).ok().map(|(_, o)| o)
}
