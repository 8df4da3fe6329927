use aoc2025_day_25::*;

const EXAMPLE: &str = "START-A:5
START-B:2
B-A:1
A-REACTOR_1:4
B-REACTOR_2:10
A-REACTOR_2:3
";

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
