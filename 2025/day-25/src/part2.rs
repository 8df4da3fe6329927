use miette::*;

use crate::facility::{parse, Facility};
use crate::paths::reactor_routes;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let tunnels = parse(input)?;
    let facility = Facility::directed(&tunnels);

    Ok(reactor_routes(&facility)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::facility::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("5", process(EXAMPLE)?);
        Ok(())
    }
}
