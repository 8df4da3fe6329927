use bitvec::prelude::*;
use std::collections::HashSet;

use crate::presents::{Region, Shape};

/// How a region was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The presents cover more cells than the region has.
    TooLarge,
    /// Every present fits in its own bounding box, side by side.
    SideBySide,
    /// The search found a packing.
    Packed,
    /// The search ran out of placements.
    Impossible,
}

impl Verdict {
    pub fn fits(self) -> bool {
        matches!(self, Verdict::SideBySide | Verdict::Packed)
    }
}

/// Decides whether every present asked for by the region fits under the tree.
pub fn arrange(shapes: &[Shape], region: &Region) -> Verdict {
    let required: Vec<(&Shape, usize)> = region
        .counts
        .iter()
        .enumerate()
        .filter(|&(id, &count)| count > 0 && shapes[id].area() > 0)
        .map(|(id, &count)| (&shapes[id], count))
        .collect();

    let cells = region.width * region.height;
    let area: usize = required.iter().map(|(shape, count)| shape.area() * count).sum();
    if area > cells {
        return Verdict::TooLarge;
    }

    let pieces: usize = required.iter().map(|(_, count)| count).sum();
    let (box_width, box_height) = required
        .iter()
        .map(|(shape, _)| shape.base())
        .fold((1, 1), |(width, height), base| {
            (width.max(base.width), height.max(base.height))
        });
    let side_by_side =
        |w: usize, h: usize| (region.width / w) * (region.height / h) >= pieces;
    if side_by_side(box_width, box_height) || side_by_side(box_height, box_width) {
        return Verdict::SideBySide;
    }

    let mut packer = Packer::new(&required, region);
    let verdict = if packer.search(0, cells - area) {
        Verdict::Packed
    } else {
        Verdict::Impossible
    };
    tracing::debug!(dead_ends = packer.dead_ends.len(), ?verdict, "searched region");
    verdict
}

/// Exact backtracking over the first empty cell in row-major order.
///
/// That cell is either left empty, which spends one cell of slack, or
/// covered by a present whose own first cell lands on it. Every earlier cell
/// is already decided, so no other placement can cover it.
///
/// A placement anchored before the current cell reaches at most one piece
/// height below it, so the rest of the search only depends on that window of
/// the grid and on the presents still to place. Windows that failed once are
/// remembered and not searched again.
struct Packer {
    /// `placements[cell][kind]` lists the cells covered by each orientation
    /// of that present anchored on `cell`.
    placements: Vec<Vec<Vec<Vec<usize>>>>,
    remaining: Vec<usize>,
    left: usize,
    occupied: BitVec,
    /// Cells from the current one that can already be occupied.
    reach: usize,
    dead_ends: HashSet<(usize, BitVec, Vec<usize>)>,
}

impl Packer {
    fn new(required: &[(&Shape, usize)], region: &Region) -> Self {
        let (width, height) = (region.width, region.height);
        let orientations: Vec<_> = required
            .iter()
            .map(|(shape, _)| shape.orientations())
            .collect();

        let placements: Vec<Vec<Vec<Vec<usize>>>> = (0..width * height)
            .map(|cell| {
                let (x, y) = (cell % width, cell / width);
                orientations
                    .iter()
                    .map(|kind| {
                        kind.iter()
                            .filter_map(|orientation| {
                                let (anchor, _) = orientation.cells[0];
                                let left = x.checked_sub(anchor)?;
                                let inside = left + orientation.width <= width
                                    && y + orientation.height <= height;
                                inside.then(|| {
                                    orientation
                                        .cells
                                        .iter()
                                        .map(|&(cx, cy)| (y + cy) * width + left + cx)
                                        .collect::<Vec<_>>()
                                })
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let tallest = orientations
            .iter()
            .flat_map(|kind| kind.iter().map(|orientation| orientation.height))
            .max()
            .unwrap_or(1);

        let remaining: Vec<usize> = required.iter().map(|&(_, count)| count).collect();
        Self {
            placements,
            left: remaining.iter().sum(),
            remaining,
            occupied: bitvec![0; width * height],
            reach: tallest * width,
            dead_ends: HashSet::new(),
        }
    }

    fn search(&mut self, from: usize, slack: usize) -> bool {
        if self.left == 0 {
            return true;
        }
        let Some(cell) = self.occupied[from..].first_zero().map(|offset| from + offset) else {
            return false;
        };

        let window = cell..(cell + self.reach).min(self.occupied.len());
        let state = (cell, self.occupied[window].to_bitvec(), self.remaining.clone());
        if self.dead_ends.contains(&state) {
            return false;
        }

        for kind in 0..self.remaining.len() {
            if self.remaining[kind] == 0 {
                continue;
            }
            for placement in 0..self.placements[cell][kind].len() {
                if !self.place(cell, kind, placement, true) {
                    continue;
                }
                if self.search(cell + 1, slack) {
                    return true;
                }
                self.place(cell, kind, placement, false);
            }
        }

        if slack > 0 {
            self.occupied.set(cell, true);
            if self.search(cell + 1, slack - 1) {
                return true;
            }
            self.occupied.set(cell, false);
        }

        self.dead_ends.insert(state);
        false
    }

    /// Puts a present down, or lifts it back up. Returns `false` without
    /// touching the grid when it would overlap another present.
    fn place(&mut self, cell: usize, kind: usize, placement: usize, down: bool) -> bool {
        let cells = &self.placements[cell][kind][placement];
        if down && cells.iter().any(|&covered| self.occupied[covered]) {
            return false;
        }

        for &covered in cells {
            self.occupied.set(covered, down);
        }
        if down {
            self.remaining[kind] -= 1;
            self.left -= 1;
        } else {
            self.remaining[kind] += 1;
            self.left += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::presents::{parse, EXAMPLE};

    use rstest::rstest;

    #[rstest]
    #[case(0, Verdict::Packed)]
    #[case(1, Verdict::Packed)]
    #[case(2, Verdict::Impossible)]
    fn example_regions(#[case] region: usize, #[case] expected: Verdict) -> miette::Result<()> {
        let presents = parse(EXAMPLE)?;
        assert_eq!(arrange(&presents.shapes, &presents.regions[region]), expected);
        Ok(())
    }

    #[test]
    fn too_much_area_is_rejected_up_front() -> miette::Result<()> {
        let presents = parse("0:\n##\n##\n\n3x3: 3\n")?;
        assert_eq!(arrange(&presents.shapes, &presents.regions[0]), Verdict::TooLarge);
        Ok(())
    }

    #[test]
    fn roomy_regions_are_accepted_side_by_side() -> miette::Result<()> {
        let presents = parse("0:\n###\n#..\n\n9x4: 6\n")?;
        assert_eq!(arrange(&presents.shapes, &presents.regions[0]), Verdict::SideBySide);
        Ok(())
    }

    #[test]
    fn area_alone_is_not_enough() -> miette::Result<()> {
        // two 2x2 squares in a 1x8 strip
        let presents = parse("0:\n##\n##\n\n8x1: 2\n")?;
        assert_eq!(arrange(&presents.shapes, &presents.regions[0]), Verdict::Impossible);
        Ok(())
    }

    #[test]
    fn remembers_failed_windows() -> miette::Result<()> {
        let presents = parse(EXAMPLE)?;
        let region = &presents.regions[2];
        let required: Vec<(&Shape, usize)> = region
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(id, &count)| (&presents.shapes[id], count))
            .collect();
        let area: usize = required.iter().map(|(shape, count)| shape.area() * count).sum();

        let mut packer = Packer::new(&required, region);
        assert!(!packer.search(0, region.width * region.height - area));
        assert!(packer.dead_ends.contains(&(
            0,
            bitvec![0; packer.reach],
            required.iter().map(|&(_, count)| count).collect::<Vec<_>>()
        )));
        Ok(())
    }

    #[test]
    fn interlocking_needs_a_rotation() -> miette::Result<()> {
        // two L trominoes only fill a 3x2 box when one is turned around
        let presents = parse("0:\n##\n#.\n\n3x2: 2\n")?;
        assert_eq!(arrange(&presents.shapes, &presents.regions[0]), Verdict::Packed);
        Ok(())
    }
}
