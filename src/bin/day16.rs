use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::str::FromStr;

use advent2022::{captures, RegexExtractor};
use anyhow::{bail, Context};
use lazy_format::lazy_format;
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref VALVE: Regex =
        Regex::new(r"^Valve (\w+) has flow rate=(\d+); tunnels? leads? to valves? (.+)$").unwrap();
}

const START: &str = "AA";
const ALONE: u32 = 30;
const WITH_ELEPHANT: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Valve {
    name: String,
    flow: u32,
    tunnels: Vec<String>,
}

impl FromStr for Valve {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let caps = captures(&VALVE, line.trim())?;

        Ok(Valve {
            name: caps.field(1)?.to_owned(),
            flow: caps.parse(2)?,
            tunnels: caps
                .field(3)?
                .split(',')
                .map(|name| name.trim().to_owned())
                .collect(),
        })
    }
}

/// The valves worth opening, with the travel time between each pair of
/// them (and from the start) precomputed. Valves with no flow only matter
/// as corridors, so they're folded into the distances.
#[derive(Debug, Clone)]
struct Network {
    flows: Vec<u32>,
    /// `distances[i][j]` is the travel time from useful valve `i` to `j`
    distances: Vec<Vec<u32>>,
    from_start: Vec<u32>,
}

impl Network {
    fn new(valves: &[Valve]) -> anyhow::Result<Self> {
        let index: HashMap<&str, usize> = valves
            .iter()
            .enumerate()
            .map(|(i, valve)| (valve.name.as_str(), i))
            .collect();

        let tunnels: Vec<Vec<usize>> = valves
            .iter()
            .map(|valve| {
                valve
                    .tunnels
                    .iter()
                    .map(|name| {
                        index.get(name.as_str()).copied().with_context(|| {
                            format!("Valve {} leads to unknown valve {}", valve.name, name)
                        })
                    })
                    .collect::<anyhow::Result<Vec<usize>>>()
            })
            .collect::<anyhow::Result<_>>()?;

        let start = *index
            .get(START)
            .with_context(|| format!("No valve named {}", START))?;

        let useful: Vec<usize> = (0..valves.len()).filter(|&i| valves[i].flow > 0).collect();
        if useful.len() > 64 {
            bail!("{} valves with flow; at most 64 are supported", useful.len());
        }

        let bfs = |from: usize| -> Vec<Option<u32>> {
            let mut distances = vec![None; valves.len()];
            let mut queue = VecDeque::new();
            distances[from] = Some(0);
            queue.push_back(from);

            while let Some(valve) = queue.pop_front() {
                let distance = distances[valve].unwrap_or(0);
                for &next in &tunnels[valve] {
                    if distances[next].is_none() {
                        distances[next] = Some(distance + 1);
                        queue.push_back(next);
                    }
                }
            }

            distances
        };

        // Unreachable valves get a distance no schedule can afford.
        let to_useful = |distances: Vec<Option<u32>>| -> Vec<u32> {
            useful
                .iter()
                .map(|&valve| distances[valve].unwrap_or(u32::MAX / 2))
                .collect()
        };

        Ok(Network {
            flows: useful.iter().map(|&valve| valves[valve].flow).collect(),
            distances: useful.iter().map(|&valve| to_useful(bfs(valve))).collect(),
            from_start: to_useful(bfs(start)),
        })
    }

    /// The most pressure releasable in `minutes` for every set of opened
    /// valves reachable in that time. Sets are bitmasks over `flows`.
    fn best_by_opened(&self, minutes: u32) -> HashMap<u64, u32> {
        let mut best = HashMap::new();
        self.explore(None, minutes, 0, 0, &mut best);
        best
    }

    fn explore(
        &self,
        position: Option<usize>,
        remaining: u32,
        opened: u64,
        released: u32,
        best: &mut HashMap<u64, u32>,
    ) {
        let entry = best.entry(opened).or_insert(0);
        *entry = (*entry).max(released);

        for (valve, &flow) in self.flows.iter().enumerate() {
            if opened & (1 << valve) != 0 {
                continue;
            }

            let travel = match position {
                None => self.from_start[valve],
                Some(position) => self.distances[position][valve],
            };

            // One more minute to open it, and it has to stay open a minute
            // to release anything.
            if travel + 1 >= remaining {
                continue;
            }

            let left = remaining - travel - 1;
            self.explore(
                Some(valve),
                left,
                opened | (1 << valve),
                released + flow * left,
                best,
            );
        }
    }
}

/// Two actors working at once: the best pair of plans that never open the
/// same valve.
fn best_disjoint_pair(best: &HashMap<u64, u32>) -> u32 {
    let mut plans: Vec<(u64, u32)> = best
        .iter()
        .map(|(&opened, &released)| (opened, released))
        .collect();
    plans.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    plans
        .par_iter()
        .enumerate()
        .map(|(i, &(mine, released))| {
            plans[i..]
                .iter()
                .find(|&&(theirs, _)| mine & theirs == 0)
                .map(|&(_, other)| released + other)
                .unwrap_or(released)
        })
        .max()
        .unwrap_or(0)
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let valves: Vec<Valve> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let network = Network::new(&valves)?;
    debug!(useful = network.flows.len(), "compressed valve network");

    let alone = network
        .best_by_opened(ALONE)
        .values()
        .copied()
        .max()
        .unwrap_or(0);

    let plans = network.best_by_opened(WITH_ELEPHANT);
    debug!(plans = plans.len(), "enumerated plans");
    let together = best_disjoint_pair(&plans);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", alone, together))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
