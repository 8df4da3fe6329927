use aoc2025_day_4::*;

const EXAMPLE: &str = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.";

fn main() {
    divan::main();
}

#[divan::bench]
fn part1() {
    part1::process(divan::black_box(EXAMPLE)).unwrap();
}

#[divan::bench]
fn part2() {
    part2::process(divan::black_box(EXAMPLE)).unwrap();
}
