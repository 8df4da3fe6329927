use miette::*;

use crate::compressed::largest_covered_rectangle;
use crate::tiles::parse;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let red = parse(input)?;

    Ok(largest_covered_rectangle(&red)?.to_string())
}
