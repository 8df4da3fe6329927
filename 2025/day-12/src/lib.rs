pub mod packing;
pub mod part1;
pub mod presents;
