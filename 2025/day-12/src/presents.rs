use chumsky::prelude::*;
use itertools::Itertools;
use miette::*;

/// A present shape in one fixed rotation or reflection. Cells are
/// normalised to the top-left corner and sorted row by row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>,
}

impl Orientation {
    fn normalised(cells: impl Iterator<Item = (i32, i32)>) -> Self {
        let cells: Vec<(i32, i32)> = cells.collect();
        let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);

        let cells: Vec<(usize, usize)> = cells
            .into_iter()
            .map(|(x, y)| ((x - min_x) as usize, (y - min_y) as usize))
            .sorted_by_key(|&(x, y)| (y, x))
            .collect();

        Self {
            width: cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0),
            height: cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0),
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub id: usize,
    cells: Vec<(usize, usize)>,
}

impl Shape {
    pub fn new(id: usize, rows: &[Vec<bool>]) -> Self {
        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &filled)| filled)
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        Self { id, cells }
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// The shape as drawn.
    pub fn base(&self) -> Orientation {
        Orientation::normalised(self.cells.iter().map(|&(x, y)| (x as i32, y as i32)))
    }

    /// Distinct rotations and reflections, at most eight.
    pub fn orientations(&self) -> heapless::Vec<Orientation, 8> {
        let transforms: [fn(i32, i32) -> (i32, i32); 8] = [
            |x, y| (x, y),
            |x, y| (-y, x),
            |x, y| (-x, -y),
            |x, y| (y, -x),
            |x, y| (-x, y),
            |x, y| (y, x),
            |x, y| (x, -y),
            |x, y| (-y, -x),
        ];

        transforms
            .iter()
            .map(|transform| {
                Orientation::normalised(
                    self.cells
                        .iter()
                        .map(|&(x, y)| transform(x as i32, y as i32)),
                )
            })
            .unique()
            .collect()
    }
}

/// A region under a tree: `WxH: c0 c1 ...`, with one count per shape id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Presents {
    pub shapes: Vec<Shape>,
    pub regions: Vec<Region>,
}

impl Presents {
    pub fn new(mut shapes: Vec<Shape>, regions: Vec<Region>) -> Result<Self> {
        shapes.sort_by_key(|shape| shape.id);
        if let Some((index, shape)) = shapes
            .iter()
            .enumerate()
            .find(|(index, shape)| shape.id != *index)
        {
            return Err(miette!("Expected shape {index}, found shape {}", shape.id));
        }

        for region in &regions {
            if let Some(missing) = region
                .counts
                .iter()
                .enumerate()
                .position(|(id, &count)| count > 0 && id >= shapes.len())
            {
                return Err(miette!(
                    "Region {}x{} asks for unknown shape {missing}",
                    region.width,
                    region.height
                ));
            }
        }

        Ok(Self { shapes, regions })
    }
}

pub fn parser<'a>(
) -> impl Parser<'a, &'a str, (Vec<Shape>, Vec<Region>), extra::Err<Rich<'a, char>>> {
    let inline = one_of(" \t").repeated();
    let number = text::int(10).from_str::<usize>().unwrapped();

    let row = choice((just('#').to(true), just('.').to(false)))
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>();

    let shape = number
        .clone()
        .then_ignore(just(':'))
        .then_ignore(inline.clone())
        .then_ignore(text::newline())
        .then(row.separated_by(text::newline()).at_least(1).collect::<Vec<_>>())
        .map(|(id, rows)| Shape::new(id, &rows));

    let region = number
        .clone()
        .then_ignore(just('x'))
        .then(number.clone())
        .then_ignore(just(':'))
        .then(number.padded_by(inline).repeated().collect::<Vec<_>>())
        .map(|((width, height), counts)| Region {
            width,
            height,
            counts,
        });

    shape
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .then(region.padded().repeated().collect::<Vec<_>>())
}

pub fn parse(input: &str) -> Result<Presents> {
    let (shapes, regions) = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Presents::new(shapes, regions)
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2";

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn parses_example() -> Result<()> {
        let presents = parse(EXAMPLE)?;
        assert_eq!(presents.shapes.len(), 6);
        assert_eq!(presents.shapes[4].area(), 7);
        assert_eq!(
            presents.regions[1],
            Region {
                width: 12,
                height: 5,
                counts: vec![1, 0, 1, 0, 2, 2]
            }
        );
        Ok(())
    }

    #[rstest]
    #[case("#\n", 1)]
    #[case("##\n", 2)]
    #[case("##\n##\n", 1)]
    #[case("##\n#.\n", 4)]
    #[case("##.\n.##\n", 4)]
    #[case("###\n#..\n", 8)]
    fn distinct_orientations(#[case] drawing: &str, #[case] expected: usize) -> Result<()> {
        let presents = parse(&format!("0:\n{drawing}"))?;
        assert_eq!(presents.shapes[0].orientations().len(), expected);
        Ok(())
    }

    #[test]
    fn orientation_cells_are_row_major() -> Result<()> {
        let presents = parse("0:\n.#\n##\n")?;
        assert_eq!(presents.shapes[0].base().cells, vec![(1, 0), (0, 1), (1, 1)]);
        Ok(())
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(parse("0:\n#\n\n2x2: 1 1\n").is_err());
    }
}
