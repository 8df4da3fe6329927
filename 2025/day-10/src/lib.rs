pub mod joltage;
pub mod lights;
pub mod machine;
pub mod part1;
pub mod part2;
