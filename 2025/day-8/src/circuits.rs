use chumsky::prelude::*;
use glam::I64Vec3;
use itertools::Itertools;
use miette::*;

/// Connections made before the circuit sizes are measured.
pub const CONNECTIONS: usize = 1000;

/// Disjoint sets of junction boxes, with path compression and union by size.
#[derive(Debug, Clone)]
pub struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    pub fn new(boxes: usize) -> Self {
        Self {
            parent: (0..boxes).collect(),
            size: vec![1; boxes],
            count: boxes,
        }
    }

    pub fn find(&mut self, junction: usize) -> usize {
        let mut root = junction;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = junction;
        while self.parent[current] != root {
            current = std::mem::replace(&mut self.parent[current], root);
        }
        root
    }

    /// Joins the circuits of `a` and `b`. Returns `false` when they were
    /// already connected.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }

        let (large, small) = if self.size[a] >= self.size[b] { (a, b) } else { (b, a) };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.count -= 1;
        true
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Sizes of every circuit, largest first.
    pub fn sizes(&mut self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.parent.len())
            .filter(|&junction| self.find(junction) == junction)
            .collect();

        roots
            .into_iter()
            .map(|root| self.size[root])
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect()
    }
}

/// Every pair of boxes, closest first. Equal distances keep `(i, j)` order.
pub fn closest_pairs(boxes: &[I64Vec3]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize, i64)> = (0..boxes.len())
        .tuple_combinations()
        .map(|(i, j)| (i, j, (boxes[i] - boxes[j]).length_squared()))
        .collect();
    pairs.sort_by_key(|&(_, _, distance)| distance);

    pairs.into_iter().map(|(i, j, _)| (i, j)).collect()
}

/// Product of the three largest circuits after wiring up the `connections`
/// closest pairs.
pub fn largest_circuits(boxes: &[I64Vec3], connections: usize) -> Result<usize> {
    let mut circuits = Circuits::new(boxes.len());
    for (a, b) in closest_pairs(boxes).into_iter().take(connections) {
        circuits.connect(a, b);
    }

    let sizes = circuits.sizes();
    tracing::debug!(circuits = sizes.len(), largest = ?sizes.first(), "wired closest pairs");

    match sizes[..] {
        [a, b, c, ..] => Ok(a * b * c),
        _ => Err(miette!(
            "Expected at least three circuits, found {}",
            sizes.len()
        )),
    }
}

/// The pair whose connection finally joins every box into one circuit.
pub fn final_connection(boxes: &[I64Vec3]) -> Result<(I64Vec3, I64Vec3)> {
    let mut circuits = Circuits::new(boxes.len());
    for (a, b) in closest_pairs(boxes) {
        if circuits.connect(a, b) && circuits.count() == 1 {
            return Ok((boxes[a], boxes[b]));
        }
    }

    Err(miette!(
        "{} junction boxes never form a single circuit",
        boxes.len()
    ))
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<I64Vec3>, extra::Err<Rich<'a, char>>> {
    let coordinate = just('-')
        .or_not()
        .then(text::int(10))
        .to_slice()
        .from_str::<i64>()
        .unwrapped();

    coordinate
        .separated_by(just(','))
        .exactly(3)
        .collect_exactly::<[i64; 3]>()
        .map(I64Vec3::from_array)
        .separated_by(text::newline().repeated().at_least(1))
        .allow_trailing()
        .collect()
        .padded()
}

pub fn parse(input: &str) -> Result<Vec<I64Vec3>> {
    parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pair_is_the_closest() -> Result<()> {
        let boxes = parse(EXAMPLE)?;
        let (a, b) = closest_pairs(&boxes)[0];
        assert_eq!(
            (boxes[a], boxes[b]),
            (I64Vec3::new(162, 817, 812), I64Vec3::new(425, 690, 689))
        );
        Ok(())
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let boxes = [I64Vec3::ZERO, I64Vec3::X, I64Vec3::new(2, 0, 0)];
        assert_eq!(closest_pairs(&boxes), vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[test]
    fn union_by_size_tracks_counts() {
        let mut circuits = Circuits::new(5);
        assert!(circuits.connect(0, 1));
        assert!(circuits.connect(1, 2));
        assert!(!circuits.connect(0, 2));
        assert_eq!(circuits.count(), 3);
        assert_eq!(circuits.sizes(), vec![3, 1, 1]);
    }

    #[test]
    fn sizes_after_path_compression() {
        let mut circuits = Circuits::new(6);
        circuits.connect(0, 1);
        circuits.connect(2, 3);
        circuits.connect(1, 3);
        circuits.connect(4, 5);
        assert_eq!(circuits.sizes(), vec![4, 2]);
        assert_eq!(circuits.count(), 2);
    }

    #[test]
    fn too_few_circuits_is_an_error() {
        let boxes = [I64Vec3::ZERO, I64Vec3::X];
        assert!(largest_circuits(&boxes, 10).is_err());
    }

    #[test]
    fn single_box_never_connects() {
        assert!(final_connection(&[I64Vec3::ONE]).is_err());
    }
}
