use std::collections::{HashMap, VecDeque};
use std::fmt::Display;

use anyhow::{bail, Context};
use gridly::prelude::*;
use gridly_grids::VecGrid;
use lazy_format::lazy_format;

const DIRECTIONS: [Direction; 4] = [Up, Right, Down, Left];

struct Hill {
    heights: VecGrid<u8>,
    start: Location,
    end: Location,
}

impl Hill {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let lines: Vec<&str> = input.lines().map(str::trim).collect();
        let rows = lines.len() as isize;
        let columns = lines.first().map(|line| line.len()).unwrap_or(0) as isize;

        let mut heights: VecGrid<u8> =
            VecGrid::new((Rows(rows), Columns(columns))).expect("grid dimensions are non-negative");
        let mut start = None;
        let mut end = None;

        for (row, line) in lines.iter().enumerate() {
            if line.len() as isize != columns {
                bail!("Row {} is {} wide, expected {}", row, line.len(), columns);
            }

            for (column, c) in line.bytes().enumerate() {
                let location = Row(row as isize) + Column(column as isize);
                let height = match c {
                    b'S' => {
                        start = Some(location);
                        0
                    }
                    b'E' => {
                        end = Some(location);
                        b'z' - b'a'
                    }
                    b'a'..=b'z' => c - b'a',
                    _ => bail!("Unexpected character: {:?}", c as char),
                };

                heights
                    .set(location, height)
                    .expect("location is inside the hill");
            }
        }

        Ok(Hill {
            heights,
            start: start.context("No start position")?,
            end: end.context("No end position")?,
        })
    }

    fn height(&self, location: Location) -> Option<u8> {
        self.heights.get(location).ok().copied()
    }

    /// Breadth-first search backwards from the end. A step from `a` to `b`
    /// is allowed when `b` is at most one higher, so walking backwards the
    /// neighbor may be at most one lower.
    fn distances_to_end(&self) -> HashMap<Location, usize> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();

        distances.insert(self.end, 0);
        queue.push_back(self.end);

        while let Some(location) = queue.pop_front() {
            let distance = distances[&location];
            let height = match self.height(location) {
                Some(height) => height,
                None => continue,
            };

            for &direction in DIRECTIONS.iter() {
                let neighbor = location.step(direction);
                match self.height(neighbor) {
                    Some(neighbor_height) if neighbor_height + 1 >= height => {
                        if !distances.contains_key(&neighbor) {
                            distances.insert(neighbor, distance + 1);
                            queue.push_back(neighbor);
                        }
                    }
                    _ => {}
                }
            }
        }

        distances
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let hill = Hill::parse(input)?;
    let distances = hill.distances_to_end();

    let from_start = *distances
        .get(&hill.start)
        .context("The end can't be reached from the start")?;

    let from_lowest = distances
        .iter()
        .filter(|&(&location, _)| hill.height(location) == Some(0))
        .map(|(_, &distance)| distance)
        .min()
        .context("The end can't be reached from any lowest square")?;

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", from_start, from_lowest))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 31\nPart 2: 29");
    }

    #[test]
    fn finds_markers() {
        let hill = Hill::parse(SAMPLE.trim_end()).unwrap();
        assert_eq!(hill.start, Row(0) + Column(0));
        assert_eq!(hill.end, Row(2) + Column(5));
        assert_eq!(hill.height(hill.end), Some(25));
    }

    #[test]
    fn unreachable_end() {
        assert!(solve("Saz\naaE").is_err());
    }

    #[test]
    fn missing_markers() {
        assert!(Hill::parse("abc\nabE").is_err());
        assert!(Hill::parse("Sbc\nabc").is_err());
    }
}
