use chumsky::prelude::*;
use miette::*;
use std::collections::HashMap;

pub const YOU: &str = "you";
pub const SERVER: &str = "svr";
pub const OUT: &str = "out";
/// Devices every server path has to pass through, in any order.
pub const CHECKPOINTS: [&str; 2] = ["dac", "fft"];

/// Device outputs as a directed graph.
#[derive(Debug, Clone, Default)]
pub struct Network<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    InProgress,
    Counted(u64),
}

impl<'a> Network<'a> {
    pub fn new(lines: Vec<(&'a str, Vec<&'a str>)>) -> Self {
        let mut network = Self::default();
        for (device, outputs) in lines {
            let from = network.id(device);
            for output in outputs {
                let to = network.id(output);
                network.outputs[from].push(to);
            }
        }
        network
    }

    fn id(&mut self, name: &'a str) -> usize {
        let next = self.ids.len();
        let id = *self.ids.entry(name).or_insert(next);
        if id == next {
            self.outputs.push(Vec::new());
        }
        id
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Paths from `from` to `to` that pass through every checkpoint.
    ///
    /// The memo is keyed on the device and the set of checkpoints seen so
    /// far. Meeting a state that is still being expanded means the outputs
    /// loop back on themselves.
    pub fn count_paths(&self, from: &str, to: &str, checkpoints: &[&str]) -> Result<u64> {
        let start = *self
            .ids
            .get(from)
            .ok_or_else(|| miette!("Unknown start device '{from}'"))?;
        let (Some(&end), Some(required)) = (
            self.ids.get(to),
            checkpoints
                .iter()
                .map(|name| self.ids.get(*name).copied())
                .collect::<Option<Vec<_>>>(),
        ) else {
            return Ok(0);
        };

        let masks = 1 << required.len();
        let mut visits = vec![None; self.len() * masks];
        let search = Search {
            network: self,
            end,
            required: &required,
            masks,
        };
        search.count(start, 0, &mut visits)
    }
}

struct Search<'n, 'a> {
    network: &'n Network<'a>,
    end: usize,
    required: &'n [usize],
    masks: usize,
}

impl Search<'_, '_> {
    fn count(&self, device: usize, seen: usize, visits: &mut [Option<Visit>]) -> Result<u64> {
        let seen = self
            .required
            .iter()
            .enumerate()
            .filter(|(_, &checkpoint)| checkpoint == device)
            .fold(seen, |seen, (bit, _)| seen | 1 << bit);

        let state = device * self.masks + seen;
        match visits[state] {
            Some(Visit::Counted(paths)) => return Ok(paths),
            Some(Visit::InProgress) => {
                return Err(miette!("Device outputs form a cycle"));
            }
            None => visits[state] = Some(Visit::InProgress),
        }

        // Paths stop at the end device, but its outputs are still walked so a
        // loop back through it is reported.
        let mut paths = u64::from(device == self.end && seen == self.masks - 1);
        for &output in &self.network.outputs[device] {
            paths += self.count(output, seen, visits)?;
        }

        visits[state] = Some(Visit::Counted(paths));
        Ok(paths)
    }
}

/// `device: output output ...`, one device per line.
pub fn parser<'a>(
) -> impl Parser<'a, &'a str, Vec<(&'a str, Vec<&'a str>)>, extra::Err<Rich<'a, char>>> {
    let inline = one_of(" \t").repeated();
    let name = text::ident();

    name.clone()
        .then_ignore(just(':'))
        .then(name.padded_by(inline).repeated().collect::<Vec<_>>())
        .separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

pub fn parse(input: &str) -> Result<Network<'_>> {
    let lines = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    let network = Network::new(lines);
    tracing::debug!(devices = network.len(), "wired device network");
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn cycles_are_an_error() -> Result<()> {
        let network = parse("you: a\na: b\nb: a out\n")?;
        assert!(network.count_paths(YOU, OUT, &[]).is_err());
        Ok(())
    }

    #[test]
    fn cycle_through_the_end_is_an_error() -> Result<()> {
        let network = parse("you: out\nout: you\n")?;
        assert!(network.count_paths(YOU, OUT, &[]).is_err());
        Ok(())
    }

    #[test]
    fn outputs_past_the_end_add_nothing() -> Result<()> {
        let network = parse("you: a out\na: out\nout: b\nb: c\n")?;
        assert_eq!(network.count_paths(YOU, OUT, &[])?, 2);
        Ok(())
    }

    #[test]
    fn unreachable_cycles_are_fine() -> Result<()> {
        let network = parse("you: out\na: b\nb: a\n")?;
        assert_eq!(network.count_paths(YOU, OUT, &[])?, 1);
        Ok(())
    }

    #[test]
    fn missing_start_is_an_error() -> Result<()> {
        let network = parse("aaa: out\n")?;
        assert!(network.count_paths(YOU, OUT, &[]).is_err());
        Ok(())
    }

    #[test]
    fn missing_end_means_no_paths() -> Result<()> {
        let network = parse("you: aaa\n")?;
        assert_eq!(network.count_paths(YOU, OUT, &[])?, 0);
        Ok(())
    }

    #[rstest]
    #[case("svr: a dac\na: out\ndac: fft\nfft: out\n")]
    #[case("svr: fft\nfft: b dac\nb: out\ndac: out\n")]
    fn checkpoints_in_either_order(#[case] input: &str) -> Result<()> {
        let network = parse(input)?;
        assert_eq!(network.count_paths(SERVER, OUT, &CHECKPOINTS)?, 1);
        Ok(())
    }
}
