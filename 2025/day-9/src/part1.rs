use miette::*;

use crate::tiles::{largest_rectangle, parse};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let red = parse(input)?;

    Ok(largest_rectangle(&red)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tiles::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("50", process(EXAMPLE)?);
        Ok(())
    }
}
