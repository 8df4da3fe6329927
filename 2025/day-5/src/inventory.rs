use chumsky::prelude::*;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub fresh: Vec<RangeInclusive<u64>>,
    pub available: Vec<u64>,
}

/// Fresh ranges sorted by start, with overlapping or adjacent ranges joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshIds(Vec<RangeInclusive<u64>>);

impl FreshIds {
    pub fn new(mut ranges: Vec<RangeInclusive<u64>>) -> Self {
        ranges.sort_unstable_by_key(|range| *range.start());

        let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    let end = *last.end().max(range.end());
                    *last = *last.start()..=end;
                }
                _ => merged.push(range),
            }
        }
        Self(merged)
    }

    pub fn ranges(&self) -> &[RangeInclusive<u64>] {
        &self.0
    }

    pub fn contains(&self, id: u64) -> bool {
        // index of the first range starting after `id`
        let next = self.0.partition_point(|range| *range.start() <= id);
        next > 0 && self.0[next - 1].contains(&id)
    }

    /// Number of distinct IDs covered.
    pub fn len(&self) -> u64 {
        self.0
            .iter()
            .map(|range| range.end() - range.start() + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ranges like `3-5`, one per line, then a blank line and the available IDs.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Inventory, extra::Err<Rich<'a, char>>> {
    let id = text::int(10).from_str::<u64>().unwrapped();

    let range = id.clone()
        .then_ignore(just('-'))
        .then(id.clone())
        .try_map(|(start, end), span| {
            if start <= end {
                Ok(start..=end)
            } else {
                Err(Rich::custom(span, format!("range {start}-{end} ends before it starts")))
            }
        });

    let fresh = range
        .separated_by(text::newline())
        .at_least(1)
        .collect::<Vec<_>>();

    let available = id
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>();

    fresh
        .then_ignore(text::newline().repeated().at_least(2))
        .then(available)
        .padded()
        .map(|(fresh, available)| Inventory { fresh, available })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn joins_adjacent_ranges() {
        let fresh = FreshIds::new(vec![10..=14, 3..=5, 6..=8, 12..=18]);
        assert_eq!(fresh.ranges(), &[3..=8, 10..=18]);
        assert_eq!(fresh.len(), 6 + 9);
    }

    #[rstest]
    #[case(2, false)]
    #[case(3, true)]
    #[case(8, true)]
    #[case(9, false)]
    #[case(18, true)]
    #[case(19, false)]
    fn membership(#[case] id: u64, #[case] expected: bool) {
        let fresh = FreshIds::new(vec![3..=5, 6..=8, 10..=18]);
        assert_eq!(fresh.contains(id), expected);
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(parser().parse("5-3\n\n4\n").into_result().is_err());
    }
}
