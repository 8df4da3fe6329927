use bitvec::prelude::*;
use miette::*;

use crate::machine::Machine;

/// Fewest button presses that turn the indicator lights from all off into
/// the target pattern.
///
/// Pressing a button twice cancels out, so this is `A x = b` over GF(2) with
/// the smallest Hamming weight `x`. After Gauss-Jordan elimination every
/// solution is the particular one plus a combination of null space vectors,
/// which are walked in Gray code order so each step flips a single vector.
pub fn fewest_presses(machine: &Machine) -> Result<usize> {
    let wiring = machine.light_wiring();
    let buttons = wiring.len();
    let target = buttons;

    // one row per light: the buttons that toggle it, then the target bit
    let mut rows: Vec<BitVec> = (0..machine.lights.len())
        .map(|light| {
            let mut row = bitvec![0; buttons + 1];
            for (button, lights) in wiring.iter().enumerate() {
                row.set(button, lights.contains(&light));
            }
            row.set(target, machine.lights[light]);
            row
        })
        .collect();

    let mut pivots = Vec::new();
    for column in 0..buttons {
        let rank = pivots.len();
        let Some(found) = (rank..rows.len()).find(|&row| rows[row][column]) else {
            continue;
        };
        rows.swap(rank, found);

        let pivot = rows[rank].clone();
        for (index, row) in rows.iter_mut().enumerate() {
            if index != rank && row[column] {
                *row ^= pivot.as_bitslice();
            }
        }
        pivots.push(column);
    }

    if rows[pivots.len()..].iter().any(|row| row[target]) {
        return Err(miette!("No button combination lights {}", machine.lights));
    }

    let mut presses = bitvec![0; buttons];
    for (row, &column) in pivots.iter().enumerate() {
        presses.set(column, rows[row][target]);
    }

    let null_space: Vec<BitVec> = (0..buttons)
        .filter(|column| !pivots.contains(column))
        .map(|free| {
            let mut vector = bitvec![0; buttons];
            vector.set(free, true);
            for (row, &column) in pivots.iter().enumerate() {
                vector.set(column, rows[row][free]);
            }
            vector
        })
        .collect();
    if null_space.len() >= u64::BITS as usize {
        return Err(miette!(
            "{} free buttons are too many to walk every combination",
            null_space.len()
        ));
    }

    let mut fewest = presses.count_ones();
    for step in 1..1_u64 << null_space.len() {
        presses ^= null_space[step.trailing_zeros() as usize].as_bitslice();
        fewest = fewest.min(presses.count_ones());
    }
    Ok(fewest)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::machine::{parse, EXAMPLE};

    #[test]
    fn example_machines() -> Result<()> {
        let presses = parse(EXAMPLE)?
            .iter()
            .map(fewest_presses)
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(presses, vec![2, 3, 2]);
        Ok(())
    }

    #[test]
    fn lights_already_off_need_no_presses() -> Result<()> {
        let machine = &parse("[...] (0,1) (2)")?[0];
        assert_eq!(fewest_presses(machine)?, 0);
        Ok(())
    }

    #[test]
    fn too_many_free_buttons_is_an_error() -> Result<()> {
        let input = format!("[.] {}", vec!["(0)"; 65].join(" "));
        let machine = &parse(&input)?[0];
        assert!(fewest_presses(machine).is_err());
        Ok(())
    }

    #[test]
    fn unreachable_pattern_is_an_error() -> Result<()> {
        let machine = &parse("[#.] (1)")?[0];
        assert!(fewest_presses(machine).is_err());
        Ok(())
    }
}
