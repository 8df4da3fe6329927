pub mod circuits;
pub mod part1;
pub mod part2;
