use miette::*;
use num::{BigUint, One, Zero};
use std::collections::VecDeque;

use crate::facility::{Facility, START};

/// Number of distinct routes from `from` to every room, over one-way tunnels.
///
/// Only rooms reachable from `from` take part. Their routes are summed in
/// topological order, and rooms left over once the queue drains sit on a
/// cycle.
pub fn route_counts(facility: &Facility, from: usize) -> Result<Vec<BigUint>> {
    let mut reachable = vec![false; facility.len()];
    let mut stack = vec![from];
    reachable[from] = true;
    while let Some(room) = stack.pop() {
        for (next, _) in facility.links(room) {
            if !reachable[next] {
                reachable[next] = true;
                stack.push(next);
            }
        }
    }

    let mut incoming = vec![0_usize; facility.len()];
    for room in (0..facility.len()).filter(|&room| reachable[room]) {
        for (next, _) in facility.links(room) {
            incoming[next] += 1;
        }
    }

    if incoming[from] > 0 {
        return Err(miette!(
            "Tunnels loop back through {}",
            facility.name(from)
        ));
    }

    let mut routes = vec![BigUint::zero(); facility.len()];
    routes[from] = BigUint::one();

    let mut queue = VecDeque::from([from]);
    let mut ordered = 0;
    while let Some(room) = queue.pop_front() {
        ordered += 1;
        for (next, _) in facility.links(room) {
            let through = routes[room].clone();
            routes[next] += through;
            incoming[next] -= 1;
            if incoming[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    let rooms = reachable.iter().filter(|&&reachable| reachable).count();
    if ordered < rooms {
        let looping = (0..facility.len())
            .find(|&room| reachable[room] && incoming[room] > 0)
            .map_or("?", |room| facility.name(room));
        return Err(miette!("Tunnels loop back through {looping}"));
    }
    Ok(routes)
}

/// Routes from `START` summed over every reactor.
pub fn reactor_routes(facility: &Facility) -> Result<BigUint> {
    let Some(start) = facility.room(START) else {
        return Ok(BigUint::zero());
    };
    let routes = route_counts(facility, start)?;

    Ok(facility
        .reactors()
        .inspect(|&reactor| {
            tracing::debug!(
                reactor = facility.name(reactor),
                routes = %routes[reactor],
                "counted routes"
            );
        })
        .map(|reactor| &routes[reactor])
        .sum())
}
