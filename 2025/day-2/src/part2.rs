use chumsky::prelude::*;
use miette::*;

use crate::ids::{parser, sum_invalid, Repetition};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let ranges = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    tracing::debug!(ranges = ranges.len(), "parsed id ranges");

    Ok(sum_invalid(ranges, Repetition::AtLeastTwice).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,
1698522-1698528,446443-446449,38593856-38593862,565653-565659,
824824821-824824827,2121212118-2121212124";
        assert_eq!("4174379265", process(input)?);
        Ok(())
    }
}
