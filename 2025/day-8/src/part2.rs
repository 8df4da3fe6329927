use miette::*;

use crate::circuits::{final_connection, parse};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let boxes = parse(input)?;
    let (a, b) = final_connection(&boxes)?;
    tracing::info!(%a, %b, "last connection");

    Ok((a.x * b.x).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::circuits::EXAMPLE;

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("25272", process(EXAMPLE)?);
        Ok(())
    }
}
