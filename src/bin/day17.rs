use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use anyhow::{bail, ensure};
use lazy_format::lazy_format;
use tracing::{debug, trace};

const WIDTH: usize = 7;
const LEFT_WALL: u8 = 0b100_0000;
const RIGHT_WALL: u8 = 0b000_0001;
const FULL: u8 = 0b111_1111;
const SPAWN_GAP: usize = 3;

const SHORT_RUN: u64 = 2022;
const LONG_RUN: u64 = 1_000_000_000_000;

/// Tile shapes in spawn order, bottom row first. Bit 6 is the leftmost
/// column; every shape is already shifted two columns from the left wall.
const SHAPES: [&[u8]; 5] = [
    &[0b001_1110],
    &[0b000_1000, 0b001_1100, 0b000_1000],
    &[0b001_1100, 0b000_0100, 0b000_0100],
    &[0b001_0000, 0b001_0000, 0b001_0000, 0b001_0000],
    &[0b001_1000, 0b001_1000],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jet {
    Left,
    Right,
}

fn parse_jets(input: &str) -> anyhow::Result<Vec<Jet>> {
    let jets = input
        .trim()
        .chars()
        .map(|c| match c {
            '<' => Ok(Jet::Left),
            '>' => Ok(Jet::Right),
            c => bail!("Unknown jet direction {:?}", c),
        })
        .collect::<anyhow::Result<Vec<Jet>>>()?;

    ensure!(!jets.is_empty(), "No jets in input");
    Ok(jets)
}

/// `tile` pushed one column by `jet`, unless a wall is in the way
fn pushed(tile: &[u8], jet: Jet) -> Option<Vec<u8>> {
    match jet {
        Jet::Left if tile.iter().all(|&row| row & LEFT_WALL == 0) => {
            Some(tile.iter().map(|&row| row << 1).collect())
        }
        Jet::Right if tile.iter().all(|&row| row & RIGHT_WALL == 0) => {
            Some(tile.iter().map(|&row| row >> 1).collect())
        }
        _ => None,
    }
}

/// The settled tiles, one bitmask per row from the bottom up. Rows that no
/// falling tile can reach any more are dropped and only counted.
#[derive(Debug, Clone, Default)]
struct Chamber {
    rows: Vec<u8>,
    dropped: u64,
}

impl Chamber {
    fn height(&self) -> u64 {
        self.dropped + self.rows.len() as u64
    }

    fn collides(&self, tile: &[u8], y: usize) -> bool {
        tile.iter()
            .enumerate()
            .any(|(i, &bits)| self.rows.get(y + i).map_or(false, |&row| row & bits != 0))
    }

    fn settle(&mut self, tile: &[u8], y: usize) {
        for (i, &bits) in tile.iter().enumerate() {
            if y + i >= self.rows.len() {
                self.rows.resize(y + i + 1, 0);
            }
            self.rows[y + i] |= bits;
        }
    }

    /// Flood the air down from above the tower, spreading sideways through
    /// each row. Rows below the lowest reachable cell are dropped, and any
    /// unreachable cell in the kept rows is filled in so that chambers a
    /// tile can't tell apart compare equal.
    fn compact(&mut self) {
        let mut reachable = vec![0; self.rows.len()];
        let mut above = FULL;
        let mut lowest = self.rows.len();

        for y in (0..self.rows.len()).rev() {
            let free = !self.rows[y] & FULL;
            let mut spread = above & free;
            loop {
                let next = (spread | spread << 1 | spread >> 1) & free;
                if next == spread {
                    break;
                }
                spread = next;
            }

            if spread == 0 {
                break;
            }
            reachable[y] = spread;
            above = spread;
            lowest = y;
        }

        for y in lowest..self.rows.len() {
            self.rows[y] = !reachable[y] & FULL;
        }
        self.rows.drain(..lowest);
        self.dropped += lowest as u64;
    }
}

impl Display for Chamber {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for &row in self.rows.iter().rev() {
            write!(f, "\n|")?;
            for column in 0..WIDTH {
                let c = if row & (LEFT_WALL >> column) != 0 { '#' } else { '.' };
                write!(f, "{}", c)?;
            }
            write!(f, "|")?;
        }
        if self.dropped == 0 {
            write!(f, "\n+-------+")
        } else {
            write!(f, "\n~~~~~~~~~ ({} rows below)", self.dropped)
        }
    }
}

#[derive(Debug, Clone)]
struct Simulation<'a> {
    chamber: Chamber,
    jets: &'a [Jet],
    jet: usize,
    tiles: u64,
}

impl<'a> Simulation<'a> {
    fn new(jets: &'a [Jet]) -> Self {
        Simulation {
            chamber: Chamber::default(),
            jets,
            jet: 0,
            tiles: 0,
        }
    }

    fn shape(&self) -> usize {
        (self.tiles % SHAPES.len() as u64) as usize
    }

    /// Spawn the next tile and let it fall until it comes to rest.
    fn drop_tile(&mut self) {
        let mut tile = SHAPES[self.shape()].to_vec();
        let mut y = self.chamber.rows.len() + SPAWN_GAP;

        loop {
            let jet = self.jets[self.jet];
            self.jet = (self.jet + 1) % self.jets.len();

            if let Some(moved) = pushed(&tile, jet) {
                if !self.chamber.collides(&moved, y) {
                    tile = moved;
                }
            }

            if y == 0 || self.chamber.collides(&tile, y - 1) {
                break;
            }
            y -= 1;
        }

        self.chamber.settle(&tile, y);
        self.chamber.compact();
        self.tiles += 1;
    }

    /// Height of the tower once `total` tiles have come to rest. The
    /// compacted chamber is a complete description of the future, so as
    /// soon as it repeats along with the tile and jet positions, whole
    /// cycles are skipped.
    fn tower_height(mut self, total: u64) -> u64 {
        let mut seen: HashMap<(usize, usize, Vec<u8>), (u64, u64)> = HashMap::new();
        let mut skipped = None;

        while self.tiles < total {
            self.drop_tile();
            trace!(tiles = self.tiles, chamber = %self.chamber, "tile settled");

            if skipped.is_some() {
                continue;
            }

            let key = (self.shape(), self.jet, self.chamber.rows.clone());
            let state = (self.tiles, self.chamber.height());

            if let Some(&(tiles, height)) = seen.get(&key) {
                let period = self.tiles - tiles;
                let growth = self.chamber.height() - height;
                let cycles = (total - self.tiles) / period;

                debug!(
                    start = tiles,
                    period, growth, cycles, "found a repeating chamber state"
                );

                self.tiles += cycles * period;
                skipped = Some(cycles * growth);
            } else {
                seen.insert(key, state);
            }
        }

        self.chamber.height() + skipped.unwrap_or(0)
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let jets = parse_jets(input)?;

    let short = Simulation::new(&jets).tower_height(SHORT_RUN);
    let long = Simulation::new(&jets).tower_height(LONG_RUN);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", short, long))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>";

    #[test]
    fn sample() {
        let answer = solve(SAMPLE).unwrap().to_string();
        assert_eq!(answer, "Part 1: 3068\nPart 2: 1514285714288");
    }

    #[test]
    fn first_tiles() {
        let jets = parse_jets(SAMPLE).unwrap();
        let mut simulation = Simulation::new(&jets);

        simulation.drop_tile();
        assert_eq!(simulation.chamber.rows, vec![0b001_1110]);

        simulation.drop_tile();
        assert_eq!(simulation.chamber.height(), 4);
        assert_eq!(
            simulation.chamber.to_string(),
            "\n|...#...|\n|..###..|\n|...#...|\n|..####.|\n+-------+"
        );
    }

    #[test]
    fn walls_stop_pushes() {
        assert_eq!(pushed(&[0b100_0000], Jet::Left), None);
        assert_eq!(pushed(&[0b000_0001], Jet::Right), None);
        assert_eq!(pushed(&[0b001_1110], Jet::Left), Some(vec![0b011_1100]));
    }

    #[test]
    fn compaction_drops_unreachable_rows() {
        let mut chamber = Chamber {
            rows: vec![0b111_1111, 0b000_1000, 0b111_0111, 0b000_1000],
            dropped: 0,
        };
        chamber.compact();

        assert_eq!(chamber.rows, vec![0b000_1000]);
        assert_eq!(chamber.dropped, 3);
        assert_eq!(chamber.height(), 4);
    }

    #[test]
    fn pockets_under_overhangs_are_kept() {
        // The gap in column 1 opens onto a row that is free all the way to
        // column 6, below the top of every other column.
        let rows = vec![0b111_1110, 0b100_0000, 0b101_1111, 0b101_1111];
        let mut chamber = Chamber {
            rows: rows.clone(),
            dropped: 0,
        };
        chamber.compact();

        assert_eq!(chamber.rows, rows);
        assert_eq!(chamber.dropped, 0);
    }

    #[test]
    fn unreachable_air_is_filled() {
        let mut chamber = Chamber {
            rows: vec![0b101_1101, 0b111_1101],
            dropped: 0,
        };
        chamber.compact();

        assert_eq!(chamber.rows, vec![0b111_1101, 0b111_1101]);
        assert_eq!(chamber.dropped, 0);
    }

    #[test]
    fn open_column_keeps_everything() {
        let mut chamber = Chamber {
            rows: vec![0b111_1110, 0b111_1110],
            dropped: 0,
        };
        chamber.compact();
        assert_eq!(chamber.rows.len(), 2);
    }

    /// Tower height after `tiles` tiles with every row kept
    fn uncompacted_height(jets: &[Jet], tiles: u64) -> u64 {
        let mut chamber = Chamber::default();
        let mut jet = 0;

        for tile in 0..tiles {
            let mut shape = SHAPES[(tile % SHAPES.len() as u64) as usize].to_vec();
            let mut y = chamber.rows.len() + SPAWN_GAP;

            loop {
                if let Some(moved) = pushed(&shape, jets[jet]) {
                    if !chamber.collides(&moved, y) {
                        shape = moved;
                    }
                }
                jet = (jet + 1) % jets.len();

                if y == 0 || chamber.collides(&shape, y - 1) {
                    break;
                }
                y -= 1;
            }

            chamber.settle(&shape, y);
        }

        chamber.height()
    }

    #[test]
    fn matches_uncompacted_simulation() {
        let mut patterns = vec![
            SAMPLE.to_owned(),
            "><>><><<>><>>><<<<>>>>>>>>><><<<".to_owned(),
            "<<<><<><><>>>><<>>>><><>><>><<<<>><><<<>><<>".to_owned(),
        ];

        let mut state: u64 = 0x2022_1217;
        let mut random = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        for _ in 0..40 {
            let len = 5 + random() % 40;
            let pattern = (0..len)
                .map(|_| if random() & 1 == 0 { '<' } else { '>' })
                .collect();
            patterns.push(pattern);
        }

        for pattern in &patterns {
            let jets = parse_jets(pattern).unwrap();
            assert_eq!(
                Simulation::new(&jets).tower_height(SHORT_RUN),
                uncompacted_height(&jets, SHORT_RUN),
                "jets {}",
                pattern
            );
        }
    }

    #[test]
    fn rejects_unknown_jets() {
        assert!(parse_jets("<>^").is_err());
        assert!(parse_jets("").is_err());
    }
}
