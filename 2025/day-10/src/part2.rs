use miette::*;
use rayon::prelude::*;

use crate::joltage::fewest_presses;
use crate::machine::parse;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let machines = parse(input)?;

    let presses = machines
        .par_iter()
        .enumerate()
        .map(|(index, machine)| {
            fewest_presses(machine).wrap_err_with(|| format!("Machine {} is unsolvable", index + 1))
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(machines = presses.len(), "configured joltage counters");

    Ok(presses.iter().sum::<i64>().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::machine::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("33", process(EXAMPLE)?);
        Ok(())
    }
}
