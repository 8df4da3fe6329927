use chumsky::prelude::*;
use glam::I64Vec2;
use itertools::Itertools;
use miette::*;

/// Tiles covered by the rectangle with opposite corners `a` and `b`.
pub fn area(a: I64Vec2, b: I64Vec2) -> i64 {
    let size = (a - b).abs() + I64Vec2::ONE;
    size.x * size.y
}

/// Largest rectangle with two red tiles as opposite corners.
pub fn largest_rectangle(red: &[I64Vec2]) -> Result<i64> {
    red.iter()
        .tuple_combinations()
        .map(|(&a, &b)| area(a, b))
        .max()
        .ok_or_else(|| miette!("Need at least two red tiles, found {}", red.len()))
}

/// Red tiles, one `x,y` per line, in the order they are joined by green
/// edges. The last one joins back to the first.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<I64Vec2>, extra::Err<Rich<'a, char>>> {
    let coordinate = just('-')
        .or_not()
        .then(text::int(10))
        .to_slice()
        .from_str::<i64>()
        .unwrapped();

    coordinate
        .clone()
        .then_ignore(just(',').padded())
        .then(coordinate)
        .map(|(x, y)| I64Vec2::new(x, y))
        .separated_by(text::newline().repeated().at_least(1))
        .allow_trailing()
        .collect()
        .padded()
}

pub fn parse(input: &str) -> Result<Vec<I64Vec2>> {
    parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "7,1
11,1
11,7
9,7
9,5
2,5
2,3
7,3";

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(I64Vec2::new(2, 5), I64Vec2::new(9, 7), 24)]
    #[case(I64Vec2::new(7, 1), I64Vec2::new(11, 7), 35)]
    #[case(I64Vec2::new(7, 3), I64Vec2::new(2, 3), 6)]
    #[case(I64Vec2::new(4, 4), I64Vec2::new(4, 4), 1)]
    fn area_is_inclusive(#[case] a: I64Vec2, #[case] b: I64Vec2, #[case] expected: i64) {
        assert_eq!(area(a, b), expected);
        assert_eq!(area(b, a), expected);
    }

    #[test]
    fn single_tile_is_an_error() {
        assert!(largest_rectangle(&[I64Vec2::ONE]).is_err());
    }
}
