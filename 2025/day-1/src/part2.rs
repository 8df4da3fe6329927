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
    let zero_clicks: u64 = rotations
        .into_iter()
        .map(|rotation| dial.rotate(rotation).zero_clicks)
        .sum();

    Ok(zero_clicks.to_string())
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
        assert_eq!("6", process(input)?);
        Ok(())
    }

    #[test]
    fn counts_every_pass_of_a_long_rotation() -> Result<()> {
        assert_eq!("10", process("R1000")?);
        Ok(())
    }
}
