use chumsky::prelude::*;

/// Number of clicks in one full turn of the dial.
pub const DIAL_SIZE: u64 = 100;

/// Where the dial points before the first rotation.
pub const START_POSITION: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left(u64),
    Right(u64),
}

/// Outcome of a single rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// The dial came to rest on 0.
    pub stopped_at_zero: bool,
    /// Clicks during the rotation (including the final one) that pointed at 0.
    pub zero_clicks: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Dial {
    position: u64,
}

impl Default for Dial {
    fn default() -> Self {
        Self {
            position: START_POSITION,
        }
    }
}

impl Dial {
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn rotate(&mut self, rotation: Rotation) -> Turn {
        let from = self.position;

        let (to, zero_clicks) = match rotation {
            Rotation::Left(clicks) => {
                let to = (from + DIAL_SIZE - clicks % DIAL_SIZE) % DIAL_SIZE;
                // Moving left from `from` reaches 0 after exactly `from` clicks,
                // then again every full turn.
                let zero_clicks = match from {
                    0 => clicks / DIAL_SIZE,
                    _ if clicks >= from => 1 + (clicks - from) / DIAL_SIZE,
                    _ => 0,
                };
                (to, zero_clicks)
            }
            Rotation::Right(clicks) => ((from + clicks) % DIAL_SIZE, (from + clicks) / DIAL_SIZE),
        };

        self.position = to;
        Turn {
            stopped_at_zero: to == 0,
            zero_clicks,
        }
    }
}

/// Rotations are one per line (`L68`, `R48`). Blank lines are skipped.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Rotation>, extra::Err<Rich<'a, char>>> {
    one_of("LR")
        .then(text::int(10).from_str::<u64>().unwrapped())
        .map(|(direction, clicks)| match direction {
            'L' => Rotation::Left(clicks),
            _ => Rotation::Right(clicks),
        })
        .padded()
        .repeated()
        .collect()
}
