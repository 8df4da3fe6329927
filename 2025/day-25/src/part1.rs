use miette::*;

use crate::facility::{parse, Facility};
use crate::signal::slowest_reactor;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let tunnels = parse(input)?;
    let facility = Facility::undirected(&tunnels);

    Ok(slowest_reactor(&facility)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::facility::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("7", process(EXAMPLE)?);
        Ok(())
    }
}
