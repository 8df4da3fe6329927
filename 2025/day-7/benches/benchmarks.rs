use aoc2025_day_7::*;

const EXAMPLE: &str = ".......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............";

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
