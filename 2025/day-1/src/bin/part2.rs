use miette::*;

use aoc2025_day_1::part2;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/input2.txt").to_string());
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read puzzle input from {path}"))?;
    let result = part2::process(&input)?;
    println!("Result: {}", result);
    Ok(())
}
