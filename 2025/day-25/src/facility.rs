use miette::*;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0, multispace1, space0},
    combinator::{all_consuming, map_res},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};
use nom_locate::LocatedSpan;
use std::collections::{BTreeMap, HashMap};

pub const START: &str = "START";
pub const REACTOR_PREFIX: &str = "REACTOR_";

type Span<'a> = LocatedSpan<&'a str>;

/// One line of the facility map: `A-B:length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunnel<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub length: u64,
}

fn room(input: Span) -> IResult<Span, Span> {
    delimited(
        space0,
        take_while1(|c: char| !c.is_whitespace() && c != '-' && c != ':'),
        space0,
    )(input)
}

fn length(input: Span) -> IResult<Span, u64> {
    delimited(
        space0,
        map_res(digit1, |digits: Span| digits.fragment().parse::<u64>()),
        space0,
    )(input)
}

fn tunnel(input: Span) -> IResult<Span, Tunnel> {
    let (rest, ((from, to), length)) =
        separated_pair(separated_pair(room, char('-'), room), char(':'), length)(input)?;

    Ok((
        rest,
        Tunnel {
            from: *from.fragment(),
            to: *to.fragment(),
            length,
        },
    ))
}

fn tunnels(input: Span) -> IResult<Span, Vec<Tunnel>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, tunnel),
        multispace0,
    ))(input)
}

pub fn parse(input: &str) -> Result<Vec<Tunnel<'_>>> {
    match tunnels(Span::new(input)) {
        Ok((_, tunnels)) => Ok(tunnels),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(miette!(
            "Parse failed at line {}, column {}: {:?}",
            e.input.location_line(),
            e.input.get_utf8_column(),
            e.code
        )),
        Err(nom::Err::Incomplete(needed)) => Err(miette!("Parse failed: incomplete input ({needed:?})")),
    }
}

/// Rooms joined by tunnels. A later tunnel between the same rooms replaces
/// the earlier one.
#[derive(Debug, Clone, Default)]
pub struct Facility<'a> {
    ids: HashMap<&'a str, usize>,
    names: Vec<&'a str>,
    links: Vec<BTreeMap<usize, u64>>,
}

impl<'a> Facility<'a> {
    /// Signals travel both ways through a tunnel.
    pub fn undirected(tunnels: &[Tunnel<'a>]) -> Self {
        let mut facility = Self::default();
        for tunnel in tunnels {
            let (from, to) = (facility.id(tunnel.from), facility.id(tunnel.to));
            facility.links[from].insert(to, tunnel.length);
            facility.links[to].insert(from, tunnel.length);
        }
        facility
    }

    /// Tunnels only lead from `A` to `B`.
    pub fn directed(tunnels: &[Tunnel<'a>]) -> Self {
        let mut facility = Self::default();
        for tunnel in tunnels {
            let (from, to) = (facility.id(tunnel.from), facility.id(tunnel.to));
            facility.links[from].insert(to, tunnel.length);
        }
        facility
    }

    fn id(&mut self, name: &'a str) -> usize {
        *self.ids.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.links.push(BTreeMap::new());
            self.names.len() - 1
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn room(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, room: usize) -> &'a str {
        self.names[room]
    }

    pub fn links(&self, room: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.links[room].iter().map(|(&next, &length)| (next, length))
    }

    /// Rooms named `REACTOR_*`, in the order they first appear.
    pub fn reactors(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&room| self.names[room].starts_with(REACTOR_PREFIX))
    }
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "START-A:5
START-B:2
B-A:1
A-REACTOR_1:4
B-REACTOR_2:10
A-REACTOR_2:3
";
