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

    Ok(sum_invalid(ranges, Repetition::Twice).to_string())
}
