use miette::*;

use crate::devices::{parse, OUT, YOU};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = parse(input)?;

    Ok(network.count_paths(YOU, OUT, &[])?.to_string())
}
