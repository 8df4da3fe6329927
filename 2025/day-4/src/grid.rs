use bitvec::prelude::*;
use chumsky::prelude::*;
use itertools::iproduct;

/// A roll can be reached by a forklift when fewer than this many of its
/// eight neighbours are rolls too.
pub const CROWDED: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rolls: BitVec,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, String> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().position(|row| row.len() != width) {
            return Err(format!(
                "row {} has {} cells, expected {width}",
                row + 1,
                rows[row].len()
            ));
        }

        Ok(Self {
            width,
            height: rows.len(),
            rolls: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rolls(&self) -> usize {
        self.rolls.count_ones()
    }

    fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = ((index % self.width) as isize, (index / self.width) as isize);

        iproduct!(-1..=1_isize, -1..=1_isize)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                let inside = (0..self.width as isize).contains(&nx)
                    && (0..self.height as isize).contains(&ny);
                inside.then(|| ny as usize * self.width + nx as usize)
            })
    }

    fn crowding(&self) -> Vec<u8> {
        (0..self.rolls.len())
            .map(|index| {
                self.neighbours(index)
                    .filter(|&neighbour| self.rolls[neighbour])
                    .count() as u8
            })
            .collect()
    }

    /// Rolls that can be taken right now.
    pub fn accessible(&self) -> usize {
        let crowding = self.crowding();
        self.rolls
            .iter_ones()
            .filter(|&index| crowding[index] < CROWDED)
            .count()
    }

    /// Keeps taking accessible rolls until none are left and returns how many
    /// were removed.
    ///
    /// Removing a roll only ever lowers its neighbours' counts, so a roll that
    /// became accessible stays accessible and the processing order does not
    /// change the total.
    pub fn clear_accessible(&mut self) -> usize {
        let mut crowding = self.crowding();
        let mut pending: Vec<usize> = self
            .rolls
            .iter_ones()
            .filter(|&index| crowding[index] < CROWDED)
            .collect();

        let mut removed = 0;
        while let Some(index) = pending.pop() {
            self.rolls.set(index, false);
            removed += 1;

            let neighbours: Vec<usize> = self.neighbours(index).collect();
            for neighbour in neighbours {
                crowding[neighbour] -= 1;
                if self.rolls[neighbour] && crowding[neighbour] == CROWDED - 1 {
                    pending.push(neighbour);
                }
            }
        }

        tracing::debug!(removed, left = self.rolls(), "no accessible rolls remain");
        removed
    }
}

/// `@` marks a roll of paper, `.` an empty spot. Blank lines are ignored.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Grid, extra::Err<Rich<'a, char>>> {
    let cell = choice((just('@').to(true), just('.').to(false)));

    cell.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>()
        .try_map(|rows, span| {
            let rows = rows.into_iter().filter(|row| !row.is_empty()).collect();
            Grid::from_rows(rows).map_err(|message| Rich::custom(span, message))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_rolls_are_accessible() {
        let grid = parser().parse("@.@\n...\n@.@\n").into_result().unwrap();
        assert_eq!(grid.accessible(), 4);
    }

    #[test]
    fn full_block_only_exposes_corners() {
        let mut grid = parser().parse("@@@\n@@@\n@@@").into_result().unwrap();
        assert_eq!(grid.accessible(), 4);
        assert_eq!(grid.clear_accessible(), 9);
        assert_eq!(grid.rolls(), 0);
    }

    #[test]
    fn rejects_unknown_cells() {
        assert!(parser().parse("@.#\n").into_result().is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(parser().parse("@.@\n@@\n").into_result().is_err());
    }
}
