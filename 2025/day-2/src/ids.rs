use chumsky::prelude::*;
use rayon::prelude::*;
use std::ops::RangeInclusive;

/// How many times a digit block has to repeat for an ID to be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// `6464`, `123123`, but not `111`.
    Twice,
    /// Any block repeated two or more times: `111`, `121212`, `6464`.
    AtLeastTwice,
}

impl Repetition {
    pub fn matches(self, id: u64) -> bool {
        let digits = digit_count(id);
        match self {
            Repetition::Twice => digits % 2 == 0 && repeats_block(id, digits, digits / 2),
            Repetition::AtLeastTwice => {
                (1..=digits / 2).any(|block| repeats_block(id, digits, block))
            }
        }
    }
}

fn digit_count(id: u64) -> u32 {
    id.checked_ilog10().map_or(1, |log| log + 1)
}

/// `id` is a `block`-digit number written `digits / block` times in a row.
///
/// Such numbers are exactly the multiples of the mask `1 0..0 1 0..0 1`
/// (one `1` per repetition) that still have `digits` digits.
fn repeats_block(id: u64, digits: u32, block: u32) -> bool {
    if block == 0 || digits % block != 0 || digits / block < 2 {
        return false;
    }

    let shift = 10_u64.pow(block);
    let mask = (1..digits / block).fold(1_u64, |mask, _| mask * shift + 1);

    id % mask == 0
}

/// Sorts and merges overlapping or touching ranges so each ID is visited once.
pub fn merge(mut ranges: Vec<RangeInclusive<u64>>) -> Vec<RangeInclusive<u64>> {
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Sums every invalid ID inside the ranges.
pub fn sum_invalid(ranges: Vec<RangeInclusive<u64>>, repetition: Repetition) -> u64 {
    merge(ranges)
        .into_par_iter()
        .map(|range| range.filter(|&id| repetition.matches(id)).sum::<u64>())
        .sum()
}

/// Comma separated `start-end` ranges. The list may wrap over several lines
/// and end with a trailing comma.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<RangeInclusive<u64>>, extra::Err<Rich<'a, char>>>
{
    let id = text::int(10).from_str::<u64>().unwrapped();

    id.clone()
        .then_ignore(just('-'))
        .then(id)
        .map(|(start, end)| start..=end)
        .padded()
        .separated_by(just(','))
        .allow_trailing()
        .collect()
        .then_ignore(text::whitespace())
}
