use bitvec::prelude::*;
use chumsky::prelude::*;
use miette::*;

/// One line of the manual: `[.##.] (3) (1,3) (2) {3,5,4,7}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub lights: BitVec,
    pub buttons: Vec<Vec<usize>>,
    pub joltage: Vec<u64>,
}

impl Machine {
    /// Indicator lights toggled by each button. Indices past the last light
    /// are ignored.
    pub fn light_wiring(&self) -> Vec<Vec<usize>> {
        wiring(&self.buttons, self.lights.len())
    }

    /// Joltage counters bumped by each button. Indices past the last counter
    /// are ignored.
    pub fn counter_wiring(&self) -> Vec<Vec<usize>> {
        wiring(&self.buttons, self.joltage.len())
    }
}

fn wiring(buttons: &[Vec<usize>], len: usize) -> Vec<Vec<usize>> {
    buttons
        .iter()
        .map(|button| {
            let mut wired: Vec<usize> = button.iter().copied().filter(|&i| i < len).collect();
            wired.sort_unstable();
            wired.dedup();
            wired
        })
        .collect()
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Machine>, extra::Err<Rich<'a, char>>> {
    let inline = one_of(" \t").repeated();
    let index = text::int(10).from_str::<usize>().unwrapped();

    let lights = choice((just('.').to(false), just('#').to(true)))
        .repeated()
        .collect::<Vec<_>>()
        .delimited_by(just('['), just(']'))
        .map(|lights| lights.into_iter().collect::<BitVec>());

    let button = index
        .separated_by(just(',').padded_by(inline.clone()))
        .collect::<Vec<_>>()
        .delimited_by(just('('), just(')'));

    let joltage = text::int(10)
        .from_str::<u64>()
        .unwrapped()
        .separated_by(just(',').padded_by(inline.clone()))
        .collect::<Vec<_>>()
        .delimited_by(just('{'), just('}'));

    let machine = lights
        .padded_by(inline.clone())
        .then(button.padded_by(inline.clone()).repeated().collect::<Vec<_>>())
        .then(joltage.padded_by(inline).or_not())
        .map(|((lights, buttons), joltage)| Machine {
            lights,
            buttons,
            joltage: joltage.unwrap_or_default(),
        });

    machine
        .separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

pub fn parse(input: &str) -> Result<Vec<Machine>> {
    parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_example() -> Result<()> {
        let machines = parse(EXAMPLE)?;
        assert_eq!(machines.len(), 3);
        assert_eq!(
            machines[0].lights.iter().by_vals().collect::<Vec<_>>(),
            vec![false, true, true, false]
        );
        assert_eq!(machines[0].buttons[1], vec![1, 3]);
        assert_eq!(machines[2].joltage, vec![10, 11, 11, 5, 10, 5]);
        Ok(())
    }

    #[test]
    fn joltage_is_optional() -> Result<()> {
        let machines = parse("[#.] (0) (0,1)\n")?;
        assert!(machines[0].joltage.is_empty());
        Ok(())
    }

    #[test]
    fn out_of_range_indices_are_ignored() -> Result<()> {
        let machines = parse("[##] (0,5) (1,1,2) {4,4,4}")?;
        assert_eq!(machines[0].light_wiring(), vec![vec![0], vec![1]]);
        assert_eq!(machines[0].counter_wiring(), vec![vec![0], vec![1, 2]]);
        Ok(())
    }
}
