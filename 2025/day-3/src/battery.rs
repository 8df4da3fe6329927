use chumsky::prelude::*;

/// Batteries switched on per bank once the safety override is engaged.
pub const OVERRIDE_BATTERIES: usize = 12;

/// Largest number formed by switching on `batteries` digits of the bank
/// without reordering them. Banks shorter than that produce nothing.
///
/// Each output digit is the first maximum of the window that still leaves
/// enough digits behind it for the remaining positions.
pub fn max_joltage(bank: &[u8], batteries: usize) -> u64 {
    if bank.len() < batteries {
        return 0;
    }

    let mut start = 0;
    let mut joltage = 0;
    for remaining in (0..batteries).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, digit) = window
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &digit)| {
                if digit > best.1 {
                    (i, digit)
                } else {
                    best
                }
            });

        joltage = joltage * 10 + u64::from(digit);
        start += offset + 1;
    }
    joltage
}

pub fn total_joltage(banks: &[Vec<u8>], batteries: usize) -> u64 {
    banks.iter().map(|bank| max_joltage(bank, batteries)).sum()
}

/// One bank of digits per line.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<u8>>, extra::Err<Rich<'a, char>>> {
    let digit = one_of("0123456789").map(|c: char| c as u8 - b'0');

    digit
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn bank(digits: &str) -> Vec<u8> {
        digits.bytes().map(|b| b - b'0').collect()
    }

    #[rstest]
    #[case("987654321111111", 2, 98)]
    #[case("811111111111119", 2, 89)]
    #[case("234234234234278", 2, 78)]
    #[case("818181911112111", 2, 92)]
    #[case("987654321111111", 12, 987654321111)]
    #[case("811111111111119", 12, 811111111119)]
    #[case("234234234234278", 12, 434234234278)]
    #[case("818181911112111", 12, 888911112111)]
    #[case("5", 2, 0)]
    #[case("12345", 5, 12345)]
    fn test_max_joltage(#[case] digits: &str, #[case] batteries: usize, #[case] expected: u64) {
        assert_eq!(max_joltage(&bank(digits), batteries), expected);
    }

    #[test]
    fn parser_skips_blank_lines() {
        let banks = parser().parse("12\n\n34\n").into_result().unwrap();
        assert_eq!(banks, vec![vec![1, 2], vec![3, 4]]);
    }
}
