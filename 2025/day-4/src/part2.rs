use chumsky::prelude::*;
use miette::*;

use crate::grid::parser;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let mut grid = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Ok(grid.clear_accessible().to_string())
}
