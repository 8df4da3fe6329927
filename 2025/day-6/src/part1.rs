use miette::*;

use crate::worksheet::{parse, ReadingMode};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let worksheet = parse(input)?;

    Ok(worksheet.grand_total(ReadingMode::Rows)?.to_string())
}
