use std::collections::BTreeSet;

use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{delimited, opt, separated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{one_of, take_till};

use super::SyntaxError;

// -- Grammar ----------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<f64> {
    (
        opt(one_of(['+', '-'])),
        digit1,
        opt(('.', digit1)),
    )
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn padded_number(input: &mut &str) -> ModalResult<f64> {
    delimited(multispace0, number, multispace0).parse_next(input)
}

fn range(input: &mut &str) -> ModalResult<(f64, f64)> {
    '['.parse_next(input)?;
    let lo = padded_number.parse_next(input)?;
    ','.parse_next(input)?;
    let hi = padded_number.parse_next(input)?;
    ']'.parse_next(input)?;
    Ok((lo, hi))
}

fn list_item<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., |c: char| c == ',' || c == ']')
        .map(str::trim)
        .parse_next(input)
}

fn list<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    delimited('[', separated(1.., list_item, ','), ']').parse_next(input)
}

// -- Entry points -----------------------------------------------------------

/// Parse a numeric literal such as `100`, `-2` or `4.99`.
pub(crate) fn parse_number(text: &str) -> Result<f64, SyntaxError> {
    number
        .parse(text.trim())
        .map_err(|_| SyntaxError::new("expected a number").near(text))
}

/// Parse an inclusive range literal `[lo,hi]`.
pub(crate) fn parse_range(text: &str) -> Result<(f64, f64), SyntaxError> {
    let (lo, hi) = range
        .parse(text.trim())
        .map_err(|_| SyntaxError::new("expected a range like [1,100]").near(text))?;
    if lo > hi {
        return Err(SyntaxError::new("range lower bound exceeds upper bound").near(text));
    }
    Ok((lo, hi))
}

/// Parse a bracketed list `[a, b, c]`. Returns `None` if `text` is not a
/// bracketed list, so callers can fall back to treating it as a scalar.
pub(crate) fn parse_list(text: &str) -> Option<BTreeSet<String>> {
    list.parse(text.trim())
        .ok()
        .map(|items| items.into_iter().filter(|s| !s.is_empty()).map(str::to_owned).collect())
}
