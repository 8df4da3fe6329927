use miette::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::facility::{Facility, START};

#[derive(Debug, PartialEq, Eq)]
struct Signal {
    room: usize,
    elapsed: u64,
}

impl PartialOrd for Signal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// min-heap on elapsed time
impl Ord for Signal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.elapsed
            .cmp(&other.elapsed)
            .reverse()
            .then_with(|| self.room.cmp(&other.room))
    }
}

/// Shortest travel time from `from` to every room, `None` where the signal
/// never arrives.
pub fn travel_times(facility: &Facility, from: usize) -> Vec<Option<u64>> {
    let mut times = vec![None; facility.len()];
    let mut heap = BinaryHeap::new();

    times[from] = Some(0);
    heap.push(Signal {
        room: from,
        elapsed: 0,
    });

    while let Some(Signal { room, elapsed }) = heap.pop() {
        if times[room].is_some_and(|best| elapsed > best) {
            continue;
        }
        for (next, length) in facility.links(room) {
            let arrival = elapsed + length;
            if times[next].map_or(true, |best| arrival < best) {
                times[next] = Some(arrival);
                heap.push(Signal {
                    room: next,
                    elapsed: arrival,
                });
            }
        }
    }
    times
}

/// Time until the signal from `START` has reached every reactor.
pub fn slowest_reactor(facility: &Facility) -> Result<u64> {
    let reactors: Vec<usize> = facility.reactors().collect();
    if reactors.is_empty() {
        return Ok(0);
    }

    let start = facility
        .room(START)
        .ok_or_else(|| miette!("Facility has no {START} room"))?;
    let times = travel_times(facility, start);

    reactors
        .into_iter()
        .map(|reactor| {
            let time = times[reactor]
                .ok_or_else(|| miette!("Signal never reaches {}", facility.name(reactor)))?;
            tracing::debug!(reactor = facility.name(reactor), time, "signal arrives");
            Ok(time)
        })
        .collect::<Result<Vec<_>>>()
        .map(|times| times.into_iter().max().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::facility::{parse, EXAMPLE};

    #[test]
    fn shortest_route_may_take_more_tunnels() -> Result<()> {
        let facility = Facility::undirected(&parse(EXAMPLE)?);
        let start = facility.room(START).unwrap();
        let times = travel_times(&facility, start);

        assert_eq!(times[facility.room("A").unwrap()], Some(3));
        assert_eq!(times[facility.room("REACTOR_2").unwrap()], Some(6));
        Ok(())
    }

    #[test]
    fn unreachable_reactor_is_an_error() -> Result<()> {
        let facility = Facility::undirected(&parse("START-A:1\nB-REACTOR_1:2\n")?);
        assert!(slowest_reactor(&facility).is_err());
        Ok(())
    }

    #[test]
    fn no_reactors_takes_no_time() -> Result<()> {
        let facility = Facility::undirected(&parse("START-A:1\n")?);
        assert_eq!(slowest_reactor(&facility)?, 0);
        Ok(())
    }

    #[test]
    fn missing_start_is_an_error() -> Result<()> {
        let facility = Facility::undirected(&parse("A-REACTOR_1:1\n")?);
        assert!(slowest_reactor(&facility).is_err());
        Ok(())
    }
}
