use itertools::Itertools;
use miette::*;
use rayon::prelude::*;

use crate::packing::arrange;
use crate::presents::parse;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let presents = parse(input)?;

    let verdicts: Vec<_> = presents
        .regions
        .par_iter()
        .map(|region| arrange(&presents.shapes, region))
        .collect();
    tracing::debug!(verdicts = ?verdicts.iter().counts(), "arranged regions");

    Ok(verdicts.iter().filter(|verdict| verdict.fits()).count().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::presents::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("2", process(EXAMPLE)?);
        Ok(())
    }
}
