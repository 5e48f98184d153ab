use std::collections::{HashSet, VecDeque};
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context};
use lazy_format::lazy_format;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Cube {
    x: i32,
    y: i32,
    z: i32,
}

impl Cube {
    fn neighbors(self) -> impl Iterator<Item = Cube> {
        const OFFSETS: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];

        OFFSETS.into_iter().map(move |(dx, dy, dz)| Cube {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        })
    }
}

impl FromStr for Cube {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let coords = line
            .trim()
            .split(',')
            .map(|coord| {
                coord
                    .trim()
                    .parse::<i32>()
                    .with_context(|| format!("Invalid coordinate in {:?}", line))
            })
            .collect::<anyhow::Result<Vec<i32>>>()?;

        match coords[..] {
            [x, y, z] => Ok(Cube { x, y, z }),
            _ => bail!("Expected three coordinates, got {:?}", line),
        }
    }
}

/// Inclusive bounds of a box around every cube, with a layer of air on
/// each side so the outside is connected.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Cube,
    max: Cube,
}

impl Bounds {
    fn around(droplet: &HashSet<Cube>) -> Option<Self> {
        let mut cubes = droplet.iter();
        let first = *cubes.next()?;

        let (min, max) = cubes.fold((first, first), |(min, max), cube| {
            (
                Cube {
                    x: min.x.min(cube.x),
                    y: min.y.min(cube.y),
                    z: min.z.min(cube.z),
                },
                Cube {
                    x: max.x.max(cube.x),
                    y: max.y.max(cube.y),
                    z: max.z.max(cube.z),
                },
            )
        });

        Some(Bounds {
            min: Cube {
                x: min.x - 1,
                y: min.y - 1,
                z: min.z - 1,
            },
            max: Cube {
                x: max.x + 1,
                y: max.y + 1,
                z: max.z + 1,
            },
        })
    }

    fn contains(&self, cube: Cube) -> bool {
        (self.min.x..=self.max.x).contains(&cube.x)
            && (self.min.y..=self.max.y).contains(&cube.y)
            && (self.min.z..=self.max.z).contains(&cube.z)
    }
}

fn surface_area(droplet: &HashSet<Cube>) -> usize {
    droplet
        .iter()
        .flat_map(|cube| cube.neighbors())
        .filter(|neighbor| !droplet.contains(neighbor))
        .count()
}

/// Faces touched by the steam: flood fill the air from a corner of the
/// padded bounding box and count the droplet faces it runs into. Trapped
/// air pockets are never reached.
fn exterior_surface_area(droplet: &HashSet<Cube>) -> usize {
    let bounds = match Bounds::around(droplet) {
        Some(bounds) => bounds,
        None => return 0,
    };

    let mut outside = HashSet::new();
    let mut queue = VecDeque::new();
    let mut faces = 0;

    outside.insert(bounds.min);
    queue.push_back(bounds.min);

    while let Some(air) = queue.pop_front() {
        for neighbor in air.neighbors().filter(|&cube| bounds.contains(cube)) {
            if droplet.contains(&neighbor) {
                faces += 1;
            } else if outside.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    debug!(outside = outside.len(), ?bounds, "flooded exterior");
    faces
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let droplet: HashSet<Cube> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let total = surface_area(&droplet);
    let exterior = exterior_surface_area(&droplet);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", total, exterior))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        2,2,2
        1,2,2
        3,2,2
        2,1,2
        2,3,2
        2,2,1
        2,2,3
        2,2,4
        2,2,6
        1,2,5
        3,2,5
        2,1,5
        2,3,5
    "};

    fn droplet(cubes: &[(i32, i32, i32)]) -> HashSet<Cube> {
        cubes.iter().map(|&(x, y, z)| Cube { x, y, z }).collect()
    }

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 64\nPart 2: 58");
    }

    #[test]
    fn two_adjacent_cubes() {
        let cubes = droplet(&[(1, 1, 1), (2, 1, 1)]);
        assert_eq!(surface_area(&cubes), 10);
        assert_eq!(exterior_surface_area(&cubes), 10);
    }

    #[test]
    fn hollow_shell_hides_inner_faces() {
        let mut cubes = HashSet::new();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    if (x, y, z) != (1, 1, 1) {
                        cubes.insert(Cube { x, y, z });
                    }
                }
            }
        }

        assert_eq!(surface_area(&cubes), 54 + 6);
        assert_eq!(exterior_surface_area(&cubes), 54);
    }

    #[test]
    fn empty_droplet() {
        assert_eq!(exterior_surface_area(&HashSet::new()), 0);
    }

    #[test]
    fn rejects_malformed_cubes() {
        assert!("1,2".parse::<Cube>().is_err());
        assert!("1,2,x".parse::<Cube>().is_err());
    }
}
