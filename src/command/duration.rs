//! Quiet-period durations: `<digits><unit>` with unit one of `m`, `h`, `d`.

use nom::character::complete::{digit1, one_of};
use nom::combinator::all_consuming;
use nom::sequence::pair;
use nom::{IResult, Parser};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 1440;

fn duration_token(input: &str) -> IResult<&str, (&str, char)> {
    all_consuming(pair(digit1, one_of("mhd"))).parse(input)
}

/// Parse a single token such as `5m`, `2h` or `1d` into minutes.
///
/// Returns `None` for anything else: unknown or uppercase units, missing
/// digits, trailing characters, or a count too large to represent.
pub fn parse_minutes(token: &str) -> Option<u64> {
    let (_, (digits, unit)) = duration_token(token).ok()?;
    let count: u64 = digits.parse().ok()?;
    let scale = match unit {
        'm' => 1,
        'h' => MINUTES_PER_HOUR,
        'd' => MINUTES_PER_DAY,
        _ => return None,
    };
    count.checked_mul(scale)
}

/// Parse the first whitespace-delimited token of `args`; the rest is ignored.
pub fn parse_leading_minutes(args: &str) -> Option<u64> {
    parse_minutes(args.split_whitespace().next()?)
}
