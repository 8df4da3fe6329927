use glam::I64Vec2;
use indicatif::ParallelProgressIterator;
use miette::*;
use rayon::prelude::*;

use crate::tiles::area;

// -----------------------------------------------------------------------------
// Compressed Axes
// -----------------------------------------------------------------------------

/// One axis of the compressed floor.
///
/// Distinct coordinates sit at even indices and the gap after each of them
/// at the odd index in between, so every compressed cell is uniformly red,
/// green or empty.
#[derive(Debug, Clone)]
struct Axis {
    values: Vec<i64>,
}

impl Axis {
    fn new(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        Self { values }
    }

    fn len(&self) -> usize {
        (2 * self.values.len()).saturating_sub(1)
    }

    fn index(&self, value: i64) -> usize {
        2 * self.values.partition_point(|&v| v < value)
    }

    /// Twice the coordinate at the middle of the cell. Doubling keeps gap
    /// midpoints integral.
    fn doubled(&self, index: usize) -> i64 {
        let (k, gap) = (index / 2, index % 2 == 1);
        if gap {
            self.values[k] + self.values[k + 1]
        } else {
            2 * self.values[k]
        }
    }

    /// Gaps between neighbouring values hold no tiles at all.
    fn is_empty_gap(&self, index: usize) -> bool {
        index % 2 == 1 && self.values[index / 2 + 1] - self.values[index / 2] == 1
    }
}

// -----------------------------------------------------------------------------
// Floor Classification
// -----------------------------------------------------------------------------

/// Compressed floor, with a prefix sum over the cells outside the loop.
#[derive(Debug, Clone)]
pub struct Floor {
    xs: Axis,
    ys: Axis,
    outside: Vec<u32>,
}

impl Floor {
    pub fn new(red: &[I64Vec2]) -> Self {
        let xs = Axis::new(red.iter().map(|tile| tile.x).collect());
        let ys = Axis::new(red.iter().map(|tile| tile.y).collect());
        let (width, height) = (xs.len(), ys.len());
        tracing::debug!(red = red.len(), width, height, "compressed floor");

        // red tiles and the segments between them, in compressed coordinates
        let compress = |tile: I64Vec2| (xs.index(tile.x), ys.index(tile.y));
        let edges: Vec<_> = red
            .iter()
            .zip(red.iter().cycle().skip(1))
            .map(|(&a, &b)| (compress(a), compress(b)))
            .collect();

        // every cell on the loop itself is red or green
        let mut border = vec![false; width * height];
        for &((ax, ay), (bx, by)) in &edges {
            for y in ay.min(by)..=ay.max(by) {
                for x in ax.min(bx)..=ax.max(bx) {
                    border[y * width + x] = true;
                }
            }
        }

        // vertical edges as (x, y_low, y_high), in compressed coordinates
        let mut verticals: Vec<(usize, usize, usize)> = edges
            .iter()
            .filter(|((ax, _), (bx, _))| ax == bx)
            .map(|&((x, ay), (_, by))| (x, ay.min(by), ay.max(by)))
            .collect();
        verticals.sort_unstable();

        // scan each row left to right, flipping inside/outside at every
        // vertical edge, and accumulate the outside cells into a 2D prefix sum
        let mut outside = vec![0_u32; (width + 1) * (height + 1)];
        for y in 0..height {
            let ray = ys.doubled(y);
            // edges crossed by this row, counted with half-open spans so a
            // ray through a vertex is not counted twice
            let crossings: Vec<usize> = verticals
                .iter()
                .filter(|&&(_, low, high)| {
                    (ys.doubled(low)..ys.doubled(high)).contains(&ray)
                })
                .map(|&(x, _, _)| x)
                .collect();

            let mut crossed = 0;
            for x in 0..width {
                while crossed < crossings.len() && crossings[crossed] < x {
                    crossed += 1;
                }
                let inside = border[y * width + x] || crossed % 2 == 1;
                // gaps between adjacent coordinates hold no tiles to be outside
                let empty = xs.is_empty_gap(x) || ys.is_empty_gap(y);
                let cell = u32::from(!inside && !empty);

                outside[(y + 1) * (width + 1) + x + 1] = cell
                    + outside[y * (width + 1) + x + 1]
                    + outside[(y + 1) * (width + 1) + x]
                    - outside[y * (width + 1) + x];
            }
        }

        Self { xs, ys, outside }
    }

    fn stride(&self) -> usize {
        self.xs.len() + 1
    }

    /// Whether every tile of the rectangle is red or green.
    pub fn covers(&self, a: I64Vec2, b: I64Vec2) -> bool {
        let (ax, bx) = (self.xs.index(a.x), self.xs.index(b.x));
        let (ay, by) = (self.ys.index(a.y), self.ys.index(b.y));
        let (left, right) = (ax.min(bx), ax.max(bx) + 1);
        let (top, bottom) = (ay.min(by), ay.max(by) + 1);

        // no outside cell in the rectangle means it is fully covered
        let at = |x: usize, y: usize| self.outside[y * self.stride() + x];
        at(right, bottom) + at(left, top) == at(left, bottom) + at(right, top)
    }
}

// -----------------------------------------------------------------------------
// Main Process
// -----------------------------------------------------------------------------

/// Largest rectangle between two red tiles that stays on red or green tiles.
pub fn largest_covered_rectangle(red: &[I64Vec2]) -> Result<i64> {
    if red.len() < 2 {
        return Err(miette!("Need at least two red tiles, found {}", red.len()));
    }

    let floor = Floor::new(red);

    // each red tile against every later one, in parallel
    red.par_iter()
        .enumerate()
        .progress_count(red.len() as u64)
        .filter_map(|(i, &a)| {
            red[i + 1..]
                .iter()
                .filter(|&&b| floor.covers(a, b))
                .map(|&b| area(a, b))
                .max()
        })
        .max()
        .ok_or_else(|| miette!("No rectangle fits inside the loop"))
}
