use std::fmt::Display;

use anyhow::{bail, Context};
use gridly::prelude::*;
use gridly_grids::VecGrid;
use lazy_format::lazy_format;

const DIRECTIONS: [Direction; 4] = [Up, Right, Down, Left];

struct Forest {
    heights: VecGrid<u8>,
    rows: isize,
    columns: isize,
}

impl Forest {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let lines: Vec<&str> = input.lines().map(str::trim).collect();
        let rows = lines.len() as isize;
        let columns = lines.first().map(|line| line.len()).unwrap_or(0) as isize;

        let mut heights: VecGrid<u8> =
            VecGrid::new((Rows(rows), Columns(columns))).expect("grid dimensions are non-negative");

        for (row, line) in lines.iter().enumerate() {
            if line.len() as isize != columns {
                bail!("Row {} has {} trees, expected {}", row, line.len(), columns);
            }

            for (column, c) in line.chars().enumerate() {
                let height = c
                    .to_digit(10)
                    .with_context(|| format!("Invalid tree height {:?}", c))?;
                heights
                    .set(Row(row as isize) + Column(column as isize), height as u8)
                    .expect("location is inside the forest");
            }
        }

        Ok(Forest {
            heights,
            rows,
            columns,
        })
    }

    fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| Row(row) + Column(column)))
    }

    fn height(&self, location: Location) -> Option<u8> {
        self.heights.get(location).ok().copied()
    }

    /// Heights seen walking from `location` towards the edge, not including
    /// the tree at `location` itself.
    fn view(&self, location: Location, direction: Direction) -> impl Iterator<Item = u8> + '_ {
        let mut current = location;
        std::iter::from_fn(move || {
            current = current.step(direction);
            self.height(current)
        })
    }

    fn is_visible(&self, location: Location) -> bool {
        let height = match self.height(location) {
            Some(height) => height,
            None => return false,
        };

        DIRECTIONS
            .iter()
            .any(|&direction| self.view(location, direction).all(|tree| tree < height))
    }

    fn scenic_score(&self, location: Location) -> usize {
        let height = match self.height(location) {
            Some(height) => height,
            None => return 0,
        };

        DIRECTIONS
            .iter()
            .map(|&direction| {
                let mut seen = 0;
                for tree in self.view(location, direction) {
                    seen += 1;
                    if tree >= height {
                        break;
                    }
                }
                seen
            })
            .product()
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let forest = Forest::parse(input)?;

    let visible = forest
        .locations()
        .filter(|&location| forest.is_visible(location))
        .count();

    let best = forest
        .locations()
        .map(|location| forest.scenic_score(location))
        .max()
        .unwrap_or(0);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", visible, best))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        30373
        25512
        65332
        33549
        35390
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 21\nPart 2: 8");
    }

    #[test]
    fn scenic_scores() {
        let forest = Forest::parse(SAMPLE.trim_end()).unwrap();
        assert_eq!(forest.scenic_score(Row(1) + Column(2)), 4);
        assert_eq!(forest.scenic_score(Row(3) + Column(2)), 8);
    }

    #[test]
    fn edges_are_visible() {
        let forest = Forest::parse(SAMPLE.trim_end()).unwrap();
        assert!(forest.is_visible(Row(0) + Column(3)));
        assert!(!forest.is_visible(Row(2) + Column(2)));
    }

    #[test]
    fn ragged_forest() {
        assert!(Forest::parse("123\n12").is_err());
        assert!(Forest::parse("1x3").is_err());
    }
}
