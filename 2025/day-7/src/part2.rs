use miette::*;

use crate::manifold::parse;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let manifold = parse(input)?;

    Ok(manifold.timelines().to_string())
}
