use miette::*;
use nalgebra::DMatrix;
use num::integer::lcm;
use num::rational::Rational64;
use num::{One, Zero};

use crate::machine::Machine;

// -----------------------------------------------------------------------------
// Eliminated System
// -----------------------------------------------------------------------------

/// A pivot button in terms of the free buttons:
/// `scale * presses = constant - sum(coefficients[f] * free[f])`.
#[derive(Debug, Clone)]
struct Pivot {
    scale: i64,
    constant: i64,
    coefficients: Vec<i64>,
}

/// The counter equations after Gauss-Jordan elimination over the rationals.
#[derive(Debug, Clone)]
pub struct JoltageSystem {
    pivots: Vec<Pivot>,
    /// Upper bound on the presses of each free button.
    bounds: Vec<i64>,
    /// Total presses as `offset + sum(weights[f] * free[f])`.
    offset: Rational64,
    weights: Vec<Rational64>,
    /// `reach[p][f]`: how far the free buttons from `f` on can still raise
    /// the scaled remainder of pivot `p`.
    reach: Vec<Vec<i64>>,
    /// `floor[f]`: how far the free buttons from `f` on can still lower the
    /// total.
    floor: Vec<Rational64>,
}

impl JoltageSystem {
    pub fn new(machine: &Machine) -> Result<Self> {
        let wiring = machine.counter_wiring();
        let (counters, buttons) = (machine.joltage.len(), wiring.len());
        let target = buttons;
        let joltage = machine
            .joltage
            .iter()
            .map(|&level| i64::try_from(level).into_diagnostic())
            .collect::<Result<Vec<i64>>>()
            .wrap_err_with(|| format!("Joltage {:?} is out of range", machine.joltage))?;

        // augmented matrix: one row per counter, one column per button, then
        // the target joltage
        let mut matrix = DMatrix::from_fn(counters, buttons + 1, |counter, column| {
            if column == target {
                Rational64::from_integer(joltage[counter])
            } else if wiring[column].contains(&counter) {
                Rational64::one()
            } else {
                Rational64::zero()
            }
        });

        let mut pivots = Vec::new();
        for column in 0..buttons {
            let rank = pivots.len();
            let Some(found) = (rank..counters).find(|&row| !matrix[(row, column)].is_zero())
            else {
                continue;
            };
            matrix.swap_rows(rank, found);

            // normalise the pivot row, then clear the column everywhere else

            let lead = matrix[(rank, column)];
            for c in column..=target {
                matrix[(rank, c)] /= lead;
            }
            for row in (0..counters).filter(|&row| row != rank) {
                let factor = matrix[(row, column)];
                if factor.is_zero() {
                    continue;
                }
                for c in column..=target {
                    let delta = factor * matrix[(rank, c)];
                    matrix[(row, c)] -= delta;
                }
            }
            pivots.push(column);
        }

        // a zero row with a non-zero target has no solution at all
        if (pivots.len()..counters).any(|row| !matrix[(row, target)].is_zero()) {
            return Err(miette!(
                "No button presses reach joltage {:?}",
                machine.joltage
            ));
        }

        let free: Vec<usize> = (0..buttons).filter(|c| !pivots.contains(c)).collect();

        // scale each pivot row to integers so the search never touches a
        // fraction
        let pivots: Vec<Pivot> = (0..pivots.len())
            .map(|row| {
                let scale = free
                    .iter()
                    .map(|&c| *matrix[(row, c)].denom())
                    .fold(*matrix[(row, target)].denom(), lcm);
                let scaled = |value: Rational64| (value * scale).to_integer();

                Pivot {
                    scale,
                    constant: scaled(matrix[(row, target)]),
                    coefficients: free.iter().map(|&c| scaled(matrix[(row, c)])).collect(),
                }
            })
            .collect();

        // every button adds 1 to its counters, so it cannot be pressed more
        // often than its lowest target allows
        let bounds: Vec<i64> = free
            .iter()
            .map(|&button| {
                wiring[button]
                    .iter()
                    .map(|&counter| joltage[counter])
                    .min()
                    .unwrap_or(0)
            })
            .collect();

        // total presses with every free button at zero, and what each free
        // press adds on top once the pivots follow along
        let offset: Rational64 = pivots
            .iter()
            .map(|pivot| Rational64::new(pivot.constant, pivot.scale))
            .sum();
        let weights: Vec<Rational64> = (0..free.len())
            .map(|f| {
                pivots.iter().fold(Rational64::one(), |weight, pivot| {
                    weight - Rational64::new(pivot.coefficients[f], pivot.scale)
                })
            })
            .collect();

        // suffix bounds for pruning the search below
        let reach = pivots
            .iter()
            .map(|pivot| suffix_sums(&bounds, |f, bound| (-pivot.coefficients[f]).max(0) * bound))
            .collect();
        let floor = suffix_sums(&bounds, |f, bound| {
            weights[f].min(Rational64::zero()) * bound
        });

        Ok(Self {
            pivots,
            bounds,
            offset,
            weights,
            reach,
            floor,
        })
    }

    pub fn free_buttons(&self) -> usize {
        self.bounds.len()
    }

    /// Smallest total number of presses.
    ///
    /// Free buttons are fixed one at a time within their bounds. A branch is
    /// cut once some pivot can no longer reach zero presses, or once the
    /// lowest total it could still reach is no better than the best so far.
    pub fn fewest_presses(&self) -> Option<i64> {
        let mut remainders: Vec<i64> = self.pivots.iter().map(|pivot| pivot.constant).collect();
        let mut best = None;
        self.search(0, &mut remainders, 0, self.offset, &mut best);
        best
    }

    fn search(
        &self,
        depth: usize,
        remainders: &mut [i64],
        spent: i64,
        total: Rational64,
        best: &mut Option<i64>,
    ) {
        let stranded = remainders
            .iter()
            .zip(&self.reach)
            .any(|(&remainder, reach)| remainder + reach[depth] < 0);
        let hopeless =
            best.is_some_and(|best| total + self.floor[depth] >= Rational64::from_integer(best));
        if stranded || hopeless {
            return;
        }

        // every free button is fixed: the pivots must come out whole and
        // non-negative
        let Some(&bound) = self.bounds.get(depth) else {
            let pivots: Option<i64> = remainders
                .iter()
                .zip(&self.pivots)
                .map(|(&remainder, pivot)| {
                    (remainder % pivot.scale == 0).then(|| remainder / pivot.scale)
                })
                .sum();
            if let Some(presses) = pivots.map(|pivots| pivots + spent) {
                *best = Some(best.map_or(presses, |best| best.min(presses)));
            }
            return;
        };

        // step the remainders along with the presses, then restore them
        let weight = self.weights[depth];
        for presses in 0..=bound {
            self.search(
                depth + 1,
                remainders,
                spent + presses,
                total + weight * presses,
                best,
            );
            for (remainder, pivot) in remainders.iter_mut().zip(&self.pivots) {
                *remainder -= pivot.coefficients[depth];
            }
        }
        for (remainder, pivot) in remainders.iter_mut().zip(&self.pivots) {
            *remainder += pivot.coefficients[depth] * (bound + 1);
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// `sums[f]` adds `term(g, bounds[g])` over every `g >= f`, with a trailing
/// zero for the leaves.
fn suffix_sums<T>(bounds: &[i64], term: impl Fn(usize, i64) -> T) -> Vec<T>
where
    T: Copy + Zero,
{
    let mut sums = vec![T::zero(); bounds.len() + 1];
    for f in (0..bounds.len()).rev() {
        sums[f] = sums[f + 1] + term(f, bounds[f]);
    }
    sums
}

// -----------------------------------------------------------------------------
// Main Process
// -----------------------------------------------------------------------------

/// Fewest presses that bring every joltage counter exactly to its target.
pub fn fewest_presses(machine: &Machine) -> Result<i64> {
    let system = JoltageSystem::new(machine)?;
    tracing::trace!(free = system.free_buttons(), "eliminated joltage equations");

    system
        .fewest_presses()
        .ok_or_else(|| miette!("No whole number of presses reaches {:?}", machine.joltage))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::machine::{parse, EXAMPLE};

    use rstest::rstest;

    #[rstest]
    #[case(0, 10)]
    #[case(1, 12)]
    #[case(2, 11)]
    fn example_machines(#[case] machine: usize, #[case] expected: i64) -> Result<()> {
        let machines = parse(EXAMPLE)?;
        assert_eq!(fewest_presses(&machines[machine])?, expected);
        Ok(())
    }

    #[test]
    fn fractional_solution_is_rejected() -> Result<()> {
        // x0 + x1 = 1, x0 + x2 = 1, x1 + x2 = 1 only has x = 1/2
        let machine = &parse("[...] (0,1) (0,2) (1,2) {1,1,1}")?[0];
        assert!(fewest_presses(machine).is_err());
        Ok(())
    }

    #[test]
    fn inconsistent_counters_are_an_error() -> Result<()> {
        let machine = &parse("[..] (0,1) {1,2}")?[0];
        assert!(fewest_presses(machine).is_err());
        Ok(())
    }

    #[test]
    fn oversized_joltage_is_an_error() -> Result<()> {
        let machine = &parse("[.] (0) {18446744073709551615}")?[0];
        assert!(fewest_presses(machine).is_err());
        Ok(())
    }

    #[test]
    fn prefers_the_wider_button() -> Result<()> {
        let machine = &parse("[...] (0) (1) (2) (0,1,2) {4,4,4}")?[0];
        assert_eq!(fewest_presses(machine)?, 4);
        Ok(())
    }
}
