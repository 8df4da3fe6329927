use miette::*;

use crate::worksheet::{parse, ReadingMode};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let worksheet = parse(input)?;

    Ok(worksheet.grand_total(ReadingMode::Columns)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "123 328  51 64 \n 45 64  387 23 \n  6 98  215 314\n*   +   *   +  \n";
        assert_eq!("3263827", process(input)?);
        Ok(())
    }
}
