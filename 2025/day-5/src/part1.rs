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
    let count = inventory
        .available
        .iter()
        .filter(|&&id| fresh.contains(id))
        .count();

    Ok(count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "3-5
10-14
16-20
12-18

1
5
8
11
17
32";
        assert_eq!("3", process(input)?);
        Ok(())
    }
}
