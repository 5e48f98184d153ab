use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use advent2022::{captures, RegexExtractor};
use lazy_format::lazy_format;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ASSIGNMENT: Regex = Regex::new(r"^(\d+)-(\d+),(\d+)-(\d+)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment {
    first: RangeInclusive<u32>,
    second: RangeInclusive<u32>,
}

impl FromStr for Assignment {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let caps = captures(&ASSIGNMENT, line.trim())?;

        Ok(Assignment {
            first: caps.parse(1)?..=caps.parse(2)?,
            second: caps.parse(3)?..=caps.parse(4)?,
        })
    }
}

fn contains(outer: &RangeInclusive<u32>, inner: &RangeInclusive<u32>) -> bool {
    outer.contains(inner.start()) && outer.contains(inner.end())
}

impl Assignment {
    fn fully_contained(&self) -> bool {
        contains(&self.first, &self.second) || contains(&self.second, &self.first)
    }

    fn overlaps(&self) -> bool {
        self.first.start() <= self.second.end() && self.second.start() <= self.first.end()
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let assignments: Vec<Assignment> = input
        .lines()
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let contained = assignments.iter().filter(|a| a.fully_contained()).count();
    let overlapping = assignments.iter().filter(|a| a.overlaps()).count();

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", contained, overlapping))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        2-4,6-8
        2-3,4-5
        5-7,7-9
        2-8,3-7
        6-6,4-6
        2-6,4-8
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 2\nPart 2: 4");
    }

    #[test]
    fn parses_ranges() {
        let assignment: Assignment = "12-80,3-3".parse().unwrap();
        assert_eq!(assignment.first, 12..=80);
        assert_eq!(assignment.second, 3..=3);
        assert!(!assignment.overlaps());
    }

    #[test]
    fn rejects_malformed_line() {
        assert!("2-4;6-8".parse::<Assignment>().is_err());
    }
}
