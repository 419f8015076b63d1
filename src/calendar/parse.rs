use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use crate::error::Result;

fn year(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// Splits `YYYY-MM-DD` into its numbers without checking them against any
/// calendar, so Ethiopian dates like `2015-13-06` parse as well.
pub fn parse_ymd(input: &str) -> Result<(i32, u32, u32)> {
    let (_, (year, _, month, _, day)) =
        all_consuming(tuple((year, char('-'), number, char('-'), number)))(input.trim())?;

    Ok((year, month, day))
}

fn fixed_digits<'a>(n: usize) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    map_res(take_while_m_n(n, n, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })
}

/// Strict `YYYY-MM-DD`: four-digit year, two-digit month and day, no
/// surrounding whitespace.
pub fn parse_iso_ymd(input: &str) -> Result<(i32, u32, u32)> {
    let (_, (year, _, month, _, day)) = all_consuming(tuple((
        fixed_digits(4),
        char('-'),
        fixed_digits(2),
        char('-'),
        fixed_digits(2),
    )))(input)?;

    Ok((year as i32, month, day))
}
