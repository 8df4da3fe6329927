use bitvec::prelude::*;
use chumsky::prelude::*;
use miette::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Splitter,
    Start,
}

/// A tachyon manifold. The beam enters at `S` and travels downwards.
#[derive(Debug, Clone)]
pub struct Manifold {
    width: usize,
    rows: Vec<Vec<Cell>>,
    start: (usize, usize),
}

impl Manifold {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(miette!("Manifold rows differ in width"));
        }

        let mut starts = rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cell::Start)
                .map(move |(x, _)| (x, y))
        });
        let start = starts
            .next()
            .ok_or_else(|| miette!("Manifold has no start position 'S'"))?;
        if let Some((x, y)) = starts.next() {
            return Err(miette!("Second start position at row {}, column {}", y + 1, x + 1));
        }

        Ok(Self { width, rows, start })
    }

    /// Next row's columns for a beam at `column` of `row`. A splitter sends
    /// it to both neighbouring columns; those off the manifold are dropped.
    fn step(&self, row: &[Cell], column: usize) -> (bool, [Option<usize>; 2]) {
        match row[column] {
            Cell::Splitter => (
                true,
                [
                    column.checked_sub(1),
                    Some(column + 1).filter(|&right| right < self.width),
                ],
            ),
            _ => (false, [Some(column), None]),
        }
    }

    fn rows_below_start(&self) -> &[Vec<Cell>] {
        &self.rows[self.start.1 + 1..]
    }

    /// Splitters hit by the classical beam. Beams arriving on the same
    /// column merge, so each splitter counts at most once.
    pub fn splits(&self) -> usize {
        let mut beams = bitvec![0; self.width];
        beams.set(self.start.0, true);

        let mut splits = 0;
        for row in self.rows_below_start() {
            let mut next = bitvec![0; self.width];
            for column in beams.iter_ones() {
                let (split, targets) = self.step(row, column);
                splits += usize::from(split);
                for target in targets.into_iter().flatten() {
                    next.set(target, true);
                }
            }
            beams = next;
        }
        splits
    }

    /// Timelines of a single quantum particle. Every splitter doubles the
    /// paths through it, and a path ends when it leaves the manifold through
    /// a side or the bottom.
    pub fn timelines(&self) -> u64 {
        let mut paths = vec![0_u64; self.width];
        paths[self.start.0] = 1;

        let mut exited = 0;
        for row in self.rows_below_start() {
            let mut next = vec![0_u64; self.width];
            for (column, &count) in paths.iter().enumerate().filter(|(_, count)| **count > 0) {
                let (split, targets) = self.step(row, column);
                let kept = targets.into_iter().flatten().count() as u64;
                if split {
                    exited += count * (2 - kept);
                }
                for target in targets.into_iter().flatten() {
                    next[target] += count;
                }
            }
            paths = next;
        }
        exited + paths.iter().sum::<u64>()
    }
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<Cell>>, extra::Err<Rich<'a, char>>> {
    let cell = choice((
        just('.').to(Cell::Empty),
        just('^').to(Cell::Splitter),
        just('S').to(Cell::Start),
    ));

    cell.repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .separated_by(text::newline().repeated().at_least(1))
        .allow_trailing()
        .collect()
}

pub fn parse(input: &str) -> Result<Manifold> {
    let rows = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Manifold::new(rows)
}
