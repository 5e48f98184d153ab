use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context};
use gridly::prelude::*;
use lazy_format::lazy_format;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Motion {
    direction: Direction,
    steps: usize,
}

impl FromStr for Motion {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let (direction, steps) = line
            .trim()
            .split_once(' ')
            .with_context(|| format!("Malformed motion {:?}", line))?;

        let direction = match direction {
            "U" => Up,
            "D" => Down,
            "L" => Left,
            "R" => Right,
            other => bail!("Unsupported direction: {}", other),
        };

        Ok(Motion {
            direction,
            steps: steps
                .parse()
                .with_context(|| format!("Invalid step count in {:?}", line))?,
        })
    }
}

/// Move `knot` one step toward `leader`, unless they're already touching.
fn follow(leader: Location, knot: Location) -> Location {
    let row_distance = leader.row.0 - knot.row.0;
    let column_distance = leader.column.0 - knot.column.0;

    if row_distance.abs() <= 1 && column_distance.abs() <= 1 {
        knot
    } else {
        Row(knot.row.0 + row_distance.signum()) + Column(knot.column.0 + column_distance.signum())
    }
}

#[derive(Debug, Clone)]
struct Rope {
    knots: Vec<Location>,
}

impl Rope {
    fn new(length: usize) -> Self {
        Rope {
            knots: vec![Row(0) + Column(0); length],
        }
    }

    fn tail(&self) -> Location {
        *self.knots.last().expect("a rope has at least one knot")
    }

    fn step(&mut self, direction: Direction) {
        let (head, rest) = match self.knots.split_first_mut() {
            Some(split) => split,
            None => return,
        };

        *head = head.step(direction);

        let mut leader = *head;
        for knot in rest {
            *knot = follow(leader, *knot);
            leader = *knot;
        }
    }
}

fn tail_positions(motions: &[Motion], length: usize) -> usize {
    let mut rope = Rope::new(length);
    let mut visited: HashSet<Location> = HashSet::new();
    visited.insert(rope.tail());

    for motion in motions {
        for _ in 0..motion.steps {
            rope.step(motion.direction);
            visited.insert(rope.tail());
        }
        trace!(?motion, tail = ?rope.tail(), "moved");
    }

    visited.len()
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let motions: Vec<Motion> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let short = tail_positions(&motions, 2);
    let long = tail_positions(&motions, 10);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", short, long))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        R 4
        U 4
        L 3
        D 1
        R 4
        D 1
        L 5
        R 2
    "};

    const LARGER_SAMPLE: &str = indoc! {"
        R 5
        U 8
        L 8
        D 3
        R 17
        D 10
        L 25
        U 20
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 13\nPart 2: 1");
    }

    #[test]
    fn larger_sample() {
        let answer = solve(LARGER_SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 88\nPart 2: 36");
    }

    #[test]
    fn following() {
        let origin = Row(0) + Column(0);

        // Touching, including diagonally: no movement
        assert_eq!(follow(Row(1) + Column(1), origin), origin);
        // Straight line
        assert_eq!(follow(Row(0) + Column(2), origin), Row(0) + Column(1));
        // Diagonal catch-up
        assert_eq!(follow(Row(-2) + Column(1), origin), Row(-1) + Column(1));
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!("X 3".parse::<Motion>().is_err());
        assert!("U three".parse::<Motion>().is_err());
    }
}
