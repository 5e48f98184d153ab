use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context};
use lazy_format::lazy_format;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Shape {
    Rock,
    Paper,
    Scissors,
}

use Shape::*;

impl Shape {
    fn score(self) -> u32 {
        match self {
            Rock => 1,
            Paper => 2,
            Scissors => 3,
        }
    }

    fn beats(self) -> Shape {
        match self {
            Rock => Scissors,
            Paper => Rock,
            Scissors => Paper,
        }
    }

    fn beaten_by(self) -> Shape {
        match self {
            Rock => Paper,
            Paper => Scissors,
            Scissors => Rock,
        }
    }

    fn from_column(column: &str, letters: [&str; 3]) -> Option<Shape> {
        [Rock, Paper, Scissors]
            .into_iter()
            .zip(letters)
            .find(|&(_, letter)| letter == column)
            .map(|(shape, _)| shape)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    fn score(self) -> u32 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }

    fn between(opponent: Shape, player: Shape) -> Outcome {
        if opponent == player {
            Outcome::Draw
        } else if player.beats() == opponent {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    /// The shape the player has to throw against `opponent` to get this outcome
    fn shape_against(self, opponent: Shape) -> Shape {
        match self {
            Outcome::Loss => opponent.beats(),
            Outcome::Draw => opponent,
            Outcome::Win => opponent.beaten_by(),
        }
    }
}

/// One line of the strategy guide. The second column means a shape in the
/// first part and a desired outcome in the second, so it's kept raw.
#[derive(Debug, Clone, Copy)]
struct Line {
    opponent: Shape,
    column: Column,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Column {
    X,
    Y,
    Z,
}

impl Column {
    fn as_shape(self) -> Shape {
        match self {
            Column::X => Rock,
            Column::Y => Paper,
            Column::Z => Scissors,
        }
    }

    fn as_outcome(self) -> Outcome {
        match self {
            Column::X => Outcome::Loss,
            Column::Y => Outcome::Draw,
            Column::Z => Outcome::Win,
        }
    }
}

impl FromStr for Line {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let (opponent, column) = line
            .trim()
            .split_once(' ')
            .with_context(|| format!("Expected two columns in {:?}", line))?;

        let opponent = Shape::from_column(opponent, ["A", "B", "C"])
            .with_context(|| format!("Opponent choice {:?} is not supported", opponent))?;

        let column = match column {
            "X" => Column::X,
            "Y" => Column::Y,
            "Z" => Column::Z,
            other => bail!("Player column {:?} is not supported", other),
        };

        Ok(Line { opponent, column })
    }
}

fn round_score(opponent: Shape, player: Shape) -> u32 {
    player.score() + Outcome::between(opponent, player).score()
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let lines: Vec<Line> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let direct: u32 = lines
        .iter()
        .map(|line| round_score(line.opponent, line.column.as_shape()))
        .sum();

    let by_outcome: u32 = lines
        .iter()
        .map(|line| {
            let player = line.column.as_outcome().shape_against(line.opponent);
            round_score(line.opponent, player)
        })
        .sum();

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", direct, by_outcome))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample() {
        let answer = solve("A Y\nB X\nC Z").unwrap().to_string();
        assert_eq!(answer, "Part 1: 15\nPart 2: 12");
    }

    #[test]
    fn outcomes() {
        assert_eq!(Outcome::between(Rock, Paper), Outcome::Win);
        assert_eq!(Outcome::between(Scissors, Paper), Outcome::Loss);
        assert_eq!(Outcome::between(Paper, Paper), Outcome::Draw);
        assert_eq!(Outcome::Win.shape_against(Scissors), Rock);
        assert_eq!(Outcome::Loss.shape_against(Rock), Scissors);
    }

    #[test]
    fn rejects_unknown_letters() {
        assert!("D X".parse::<Line>().is_err());
        assert!("A W".parse::<Line>().is_err());
        assert!("AX".parse::<Line>().is_err());
    }
}
