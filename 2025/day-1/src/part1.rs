use chumsky::prelude::*;
use miette::*;

use crate::dial::{parser, Dial};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let rotations = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    let mut dial = Dial::default();
    let stops = rotations
        .into_iter()
        .filter(|&rotation| dial.rotate(rotation).stopped_at_zero)
        .count();

    Ok(stops.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "L68
L30
R48
L5
R60
L55
L1
L99
R14
L82";
        assert_eq!("3", process(input)?);
        Ok(())
    }
}
