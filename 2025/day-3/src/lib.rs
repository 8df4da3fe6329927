pub mod battery;
pub mod part1;
pub mod part2;
