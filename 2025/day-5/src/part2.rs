use chumsky::prelude::*;
use miette::*;

use crate::inventory::{parser, FreshIds};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let inventory = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    let fresh = FreshIds::new(inventory.fresh);
    tracing::debug!(ranges = fresh.ranges().len(), "merged fresh ranges");

    Ok(fresh.len().to_string())
}
