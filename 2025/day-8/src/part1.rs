use miette::*;

use crate::circuits::{largest_circuits, parse, CONNECTIONS};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let boxes = parse(input)?;

    Ok(largest_circuits(&boxes, CONNECTIONS)?.to_string())
}
