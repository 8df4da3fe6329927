pub mod devices;
pub mod part1;
pub mod part2;
