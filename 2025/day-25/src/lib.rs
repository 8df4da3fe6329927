pub mod facility;
pub mod part1;
pub mod part2;
pub mod paths;
pub mod signal;
