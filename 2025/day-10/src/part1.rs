use miette::*;
use rayon::prelude::*;

use crate::lights::fewest_presses;
use crate::machine::parse;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse(input)?;

    let presses = machines
        .par_iter()
        .map(fewest_presses)
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(machines = presses.len(), "configured indicator lights");

    Ok(presses.iter().sum::<usize>().to_string())
}
