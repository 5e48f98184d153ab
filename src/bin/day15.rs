use std::collections::HashSet;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use advent2022::{captures, InputArgs, RegexExtractor};
use anyhow::Context;
use clap::Parser;
use lazy_format::lazy_format;
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref SENSOR: Regex = Regex::new(
        r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$"
    )
    .unwrap();
}

const TUNING_MULTIPLIER: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Point {
    x: i64,
    y: i64,
}

impl Point {
    fn distance(self, other: Point) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    fn tuning_frequency(self) -> i64 {
        self.x * TUNING_MULTIPLIER + self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sensor {
    position: Point,
    beacon: Point,
    radius: i64,
}

impl FromStr for Sensor {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let caps = captures(&SENSOR, line.trim())?;

        let position = Point {
            x: caps.parse(1)?,
            y: caps.parse(2)?,
        };
        let beacon = Point {
            x: caps.parse(3)?,
            y: caps.parse(4)?,
        };

        Ok(Sensor {
            position,
            beacon,
            radius: position.distance(beacon),
        })
    }
}

impl Sensor {
    /// The x positions this sensor covers on row `y`
    fn coverage(&self, y: i64) -> Option<RangeInclusive<i64>> {
        let reach = self.radius - (self.position.y - y).abs();
        if reach < 0 {
            None
        } else {
            Some(self.position.x - reach..=self.position.x + reach)
        }
    }
}

/// Sort and merge ranges. Ranges that overlap or touch are combined, so
/// the result is disjoint, ascending, and has gaps of at least one.
fn compress(mut ranges: Vec<RangeInclusive<i64>>) -> Vec<RangeInclusive<i64>> {
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<i64>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= *last.end() + 1 => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }

    merged
}

fn row_coverage(sensors: &[Sensor], y: i64) -> Vec<RangeInclusive<i64>> {
    compress(sensors.iter().filter_map(|sensor| sensor.coverage(y)).collect())
}

/// Positions on row `y` where the distress beacon can't be.
fn excluded_positions(sensors: &[Sensor], y: i64) -> i64 {
    let coverage = row_coverage(sensors, y);

    let covered: i64 = coverage
        .iter()
        .map(|range| range.end() - range.start() + 1)
        .sum();

    let beacons = sensors
        .iter()
        .map(|sensor| sensor.beacon)
        .filter(|beacon| beacon.y == y)
        .filter(|beacon| coverage.iter().any(|range| range.contains(&beacon.x)))
        .collect::<HashSet<_>>()
        .len() as i64;

    covered - beacons
}

/// First x in `0..=limit` not covered by any of the compressed `coverage`.
fn first_gap(coverage: &[RangeInclusive<i64>], limit: i64) -> Option<i64> {
    let mut x = 0;
    for range in coverage {
        if x > limit {
            return None;
        }
        if *range.start() > x {
            return Some(x);
        }
        x = x.max(*range.end() + 1);
    }

    if x <= limit {
        Some(x)
    } else {
        None
    }
}

/// The only position within `0..=limit` on both axes that no sensor covers.
/// Rows are scanned in parallel.
fn distress_beacon(sensors: &[Sensor], limit: i64) -> Option<Point> {
    (0..=limit).into_par_iter().find_map_any(|y| {
        first_gap(&row_coverage(sensors, y), limit).map(|x| Point { x, y })
    })
}

fn solve(input: &str, row: i64, limit: i64) -> anyhow::Result<impl Display> {
    let sensors: Vec<Sensor> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;
    debug!(sensors = sensors.len(), row, limit, "parsed sensors");

    let excluded = excluded_positions(&sensors, row);

    let beacon = distress_beacon(&sensors, limit)
        .with_context(|| format!("Every position up to {} is covered", limit))?;
    debug!(?beacon, "found distress beacon");

    let frequency = beacon.tuning_frequency();
    Ok(lazy_format!("Part 1: {}\nPart 2: {}", excluded, frequency))
}

#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// Row on which to count positions that can't hold a beacon
    #[arg(long, default_value_t = 2_000_000)]
    row: i64,

    /// Upper bound of both coordinates when searching for the distress beacon
    #[arg(long, default_value_t = 4_000_000)]
    limit: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    advent2022::run_with(&cli.input, |input| solve(input, cli.row, cli.limit))
}
