use std::fmt::Display;
use std::str::FromStr;

use advent2022::{captures, RegexExtractor};
use anyhow::{bail, Context};
use joinery::prelude::*;
use lazy_format::lazy_format;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MOVE: Regex = Regex::new(r"^move (\d+) from (\d+) to (\d+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    amount: usize,
    from: usize,
    to: usize,
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let caps = captures(&MOVE, line.trim())?;

        Ok(Move {
            amount: caps.parse(1)?,
            from: caps.parse(2)?,
            to: caps.parse(3)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crane {
    /// Moves crates one at a time
    CrateMover9000,
    /// Moves a whole pile at once
    CrateMover9001,
}

/// Stacks are stored bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Stacks(Vec<Vec<char>>);

impl Stacks {
    /// Parse the drawing, without its trailing numbering line. Crate letters
    /// sit at columns 1, 5, 9, ...
    fn from_drawing(drawing: &[&str]) -> Self {
        let width = drawing
            .iter()
            .map(|line| (line.len() + 2) / 4)
            .max()
            .unwrap_or(0);

        let mut stacks = vec![Vec::new(); width];
        for line in drawing.iter().rev() {
            for (stack, item) in line.chars().skip(1).step_by(4).enumerate() {
                if item.is_ascii_alphabetic() {
                    stacks[stack].push(item);
                }
            }
        }

        Stacks(stacks)
    }

    fn stack_index(&self, stack: usize) -> anyhow::Result<usize> {
        match stack.checked_sub(1) {
            Some(index) if index < self.0.len() => Ok(index),
            _ => bail!("There is no stack {}", stack),
        }
    }

    fn apply(&mut self, step: Move, crane: Crane) -> anyhow::Result<()> {
        let from = self.stack_index(step.from)?;
        let to = self.stack_index(step.to)?;

        let source = &mut self.0[from];
        let split = source.len().checked_sub(step.amount).with_context(|| {
            format!(
                "Can't move {} crates off stack {} holding {}",
                step.amount,
                step.from,
                source.len()
            )
        })?;

        let mut pile = source.split_off(split);
        if crane == Crane::CrateMover9000 {
            pile.reverse();
        }

        self.0[to].extend(pile);
        Ok(())
    }

    fn tops(&self) -> impl Display + '_ {
        self.0.iter().filter_map(|stack| stack.last()).join_concat()
    }
}

fn parse(input: &str) -> anyhow::Result<(Stacks, Vec<Move>)> {
    let (drawing, moves) = input
        .split_once("\n\n")
        .context("Expected a blank line between the drawing and the moves")?;

    let drawing: Vec<&str> = drawing.lines().collect();
    let (_numbering, drawing) = drawing.split_last().context("Empty drawing")?;

    let moves = moves
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    Ok((Stacks::from_drawing(drawing), moves))
}

fn rearrange(stacks: &Stacks, moves: &[Move], crane: Crane) -> anyhow::Result<String> {
    let mut stacks = stacks.clone();
    for &step in moves {
        stacks.apply(step, crane)?;
    }

    let tops = stacks.tops().to_string();
    Ok(tops)
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let (stacks, moves) = parse(input)?;

    let single = rearrange(&stacks, &moves, Crane::CrateMover9000)?;
    let bulk = rearrange(&stacks, &moves, Crane::CrateMover9001)?;

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", single, bulk))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
