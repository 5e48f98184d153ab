use std::fmt::{self, Display, Formatter};

use anyhow::{bail, Context};
use gridly::prelude::*;
use gridly_grids::VecGrid;
use lazy_format::lazy_format;
use tracing::{debug, trace};

const SOURCE_X: isize = 500;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Cell {
    Air,
    Rock,
    Sand,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Air
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Point {
    x: isize,
    y: isize,
}

type RockPath = Vec<Point>;

fn parse_paths(input: &str) -> anyhow::Result<Vec<RockPath>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split("->")
                .map(|point| -> anyhow::Result<Point> {
                    let (x, y) = point
                        .trim()
                        .split_once(',')
                        .with_context(|| format!("Malformed point {:?}", point))?;
                    Ok(Point {
                        x: x.parse::<isize>()
                            .with_context(|| format!("Invalid x in {:?}", point))?,
                        y: y.parse::<isize>()
                            .with_context(|| format!("Invalid y in {:?}", point))?,
                    })
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Bottom {
    /// Sand falling below the lowest rock is lost
    Abyss,
    /// An endless floor two rows below the lowest rock
    Floor,
}

/// The slice of the cave sand can reach. Column 0 of the grid is x
/// `left`; rows are y directly.
struct Cave {
    cells: VecGrid<Cell>,
    left: isize,
    right: isize,
    lowest_rock: isize,
}

impl Cave {
    fn new(paths: &[RockPath]) -> anyhow::Result<Self> {
        let points = || paths.iter().flatten();

        let lowest_rock = points().map(|p| p.y).max().context("No rocks in the cave")?;
        if let Some(point) = points().find(|p| p.y < 0) {
            bail!("Rock at {:?} is above the sand source", point);
        }

        // Resting sand forms a pyramid under the source at most as tall as
        // the floor is deep, so the grid needs that much room either side.
        let floor = lowest_rock + 2;
        let left = points().map(|p| p.x).min().unwrap_or(SOURCE_X).min(SOURCE_X - floor) - 1;
        let right = points().map(|p| p.x).max().unwrap_or(SOURCE_X).max(SOURCE_X + floor) + 1;

        let cells = VecGrid::new((Rows(floor + 1), Columns(right - left + 1)))
            .expect("grid dimensions are non-negative");

        let mut cave = Cave {
            cells,
            left,
            right,
            lowest_rock,
        };

        for path in paths {
            if let [single] = path.as_slice() {
                cave.set(*single, Cell::Rock);
            }

            for segment in path.windows(2) {
                let (start, end) = (segment[0], segment[1]);
                if start.x != end.x && start.y != end.y {
                    bail!("Diagonal rock segment from {:?} to {:?}", start, end);
                }

                for x in start.x.min(end.x)..=start.x.max(end.x) {
                    for y in start.y.min(end.y)..=start.y.max(end.y) {
                        cave.set(Point { x, y }, Cell::Rock);
                    }
                }
            }
        }

        Ok(cave)
    }

    fn location(&self, point: Point) -> Location {
        Row(point.y) + Column(point.x - self.left)
    }

    fn get(&self, point: Point) -> Cell {
        self.cells
            .get(self.location(point))
            .ok()
            .copied()
            .unwrap_or(Cell::Air)
    }

    fn set(&mut self, point: Point, cell: Cell) {
        let location = self.location(point);
        self.cells
            .set(location, cell)
            .expect("the cave is sized to fit every rock and grain");
    }

    fn is_blocked(&self, point: Point, bottom: Bottom) -> bool {
        match bottom {
            Bottom::Floor if point.y >= self.lowest_rock + 2 => true,
            _ => self.get(point) != Cell::Air,
        }
    }

    /// Drop one grain from the source. Returns where it came to rest, or
    /// `None` if it fell into the abyss or the source is already buried.
    fn drop_grain(&mut self, bottom: Bottom) -> Option<Point> {
        let mut grain = Point { x: SOURCE_X, y: 0 };
        if self.get(grain) != Cell::Air {
            return None;
        }

        loop {
            if bottom == Bottom::Abyss && grain.y > self.lowest_rock {
                return None;
            }

            let next = [0, -1, 1]
                .iter()
                .map(|&dx| Point {
                    x: grain.x + dx,
                    y: grain.y + 1,
                })
                .find(|&candidate| !self.is_blocked(candidate, bottom));

            match next {
                Some(next) => grain = next,
                None => {
                    self.set(grain, Cell::Sand);
                    return Some(grain);
                }
            }
        }
    }

    fn fill(&mut self, bottom: Bottom) -> usize {
        let mut grains = 0;
        while self.drop_grain(bottom).is_some() {
            grains += 1;
        }

        debug!(?bottom, grains, "sand stopped");
        trace!("\n{}", self);
        grains
    }
}

impl Display for Cave {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for y in 0..=self.lowest_rock + 2 {
            for x in self.left..=self.right {
                let symbol = match self.get(Point { x, y }) {
                    _ if x == SOURCE_X && y == 0 => '+',
                    Cell::Air => '.',
                    Cell::Rock => '#',
                    Cell::Sand => 'o',
                };
                symbol.fmt(f)?;
            }
            '\n'.fmt(f)?;
        }

        Ok(())
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let paths = parse_paths(input)?;

    let abyss = Cave::new(&paths)?.fill(Bottom::Abyss);
    let floor = Cave::new(&paths)?.fill(Bottom::Floor);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", abyss, floor))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        498,4 -> 498,6 -> 496,6
        503,4 -> 502,4 -> 502,9 -> 494,9
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 24\nPart 2: 93");
    }

    #[test]
    fn first_grains() {
        let paths = parse_paths(SAMPLE).unwrap();
        let mut cave = Cave::new(&paths).unwrap();

        assert_eq!(cave.drop_grain(Bottom::Abyss), Some(Point { x: 500, y: 8 }));
        assert_eq!(cave.drop_grain(Bottom::Abyss), Some(Point { x: 499, y: 8 }));
        assert_eq!(cave.drop_grain(Bottom::Abyss), Some(Point { x: 501, y: 8 }));
    }

    #[test]
    fn rejects_diagonal_rock() {
        let paths = parse_paths("490,1 -> 495,6").unwrap();
        assert!(Cave::new(&paths).is_err());
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(parse_paths("498;4 -> 498,6").is_err());
        assert!(parse_paths("498,x").is_err());
    }
}
