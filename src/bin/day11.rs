use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;

use advent2022::{captures, RegexExtractor};
use anyhow::{bail, Context};
use lazy_format::lazy_format;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

lazy_static! {
    static ref MONKEY: Regex = Regex::new(
        r"(?x)
        ^Monkey\s+(\d+):\s*\n
        \s*Starting\ items:\s*([\d,\ ]*)\n
        \s*Operation:\ new\ =\ (old|\d+)\ ([+*])\ (old|\d+)\s*\n
        \s*Test:\ divisible\ by\ (\d+)\s*\n
        \s*If\ true:\ throw\ to\ monkey\ (\d+)\s*\n
        \s*If\ false:\ throw\ to\ monkey\ (\d+)\s*$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Old,
    Value(u64),
}

impl Operand {
    fn resolve(self, old: u64) -> u64 {
        match self {
            Operand::Old => old,
            Operand::Value(value) => value,
        }
    }
}

impl FromStr for Operand {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "old" => Ok(Operand::Old),
            value => value.parse().map(Operand::Value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(Operand, Operand),
    Mul(Operand, Operand),
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(lhs, rhs) => lhs.resolve(old) + rhs.resolve(old),
            Operation::Mul(lhs, rhs) => lhs.resolve(old) * rhs.resolve(old),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Monkey {
    items: VecDeque<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
    inspected: u64,
}

impl FromStr for Monkey {
    type Err = anyhow::Error;

    fn from_str(block: &str) -> anyhow::Result<Self> {
        let caps = captures(&MONKEY, block.trim())?;

        let items = caps
            .field(2)?
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse::<u64>()
                    .with_context(|| format!("Invalid worry level {:?}", item))
            })
            .collect::<anyhow::Result<_>>()?;

        let lhs = caps.parse(3)?;
        let rhs = caps.parse(5)?;
        let operation = match caps.field(4)? {
            "+" => Operation::Add(lhs, rhs),
            "*" => Operation::Mul(lhs, rhs),
            other => bail!("Unsupported operation: {}", other),
        };

        let divisor = caps.parse(6)?;
        if divisor == 0 {
            bail!("Monkey tests divisibility by zero");
        }

        Ok(Monkey {
            items,
            operation,
            divisor,
            if_true: caps.parse(7)?,
            if_false: caps.parse(8)?,
            inspected: 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relief {
    /// Worry is divided by three after every inspection
    Bored,
    /// Worry is kept modulo the product of every monkey's divisor
    Modulo(u64),
}

fn parse_monkeys(input: &str) -> anyhow::Result<Vec<Monkey>> {
    let monkeys: Vec<Monkey> = input
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    for (index, monkey) in monkeys.iter().enumerate() {
        for &target in &[monkey.if_true, monkey.if_false] {
            if target >= monkeys.len() {
                bail!("Monkey {} throws to unknown monkey {}", index, target);
            }
        }
    }

    Ok(monkeys)
}

fn play_round(monkeys: &mut [Monkey], relief: Relief) {
    for index in 0..monkeys.len() {
        // Items thrown back to this monkey wait for its next turn
        let items = std::mem::take(&mut monkeys[index].items);
        for item in items {
            let monkey = &mut monkeys[index];
            monkey.inspected += 1;

            let worry = monkey.operation.apply(item);
            let worry = match relief {
                Relief::Bored => worry / 3,
                Relief::Modulo(modulus) => worry % modulus,
            };

            let target = if worry % monkey.divisor == 0 {
                monkey.if_true
            } else {
                monkey.if_false
            };

            trace!(from = index, to = target, worry, "throw");
            monkeys[target].items.push_back(worry);
        }
    }
}

fn monkey_business(mut monkeys: Vec<Monkey>, rounds: usize, relief: Relief) -> u64 {
    for round in 1..=rounds {
        play_round(&mut monkeys, relief);
        debug!(
            round,
            holding = ?monkeys.iter().map(|m| m.items.len()).collect::<Vec<_>>(),
            "round finished"
        );
    }

    let mut counts: Vec<u64> = monkeys.iter().map(|monkey| monkey.inspected).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.iter().take(2).product()
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let monkeys = parse_monkeys(input).context("Failed to parse monkeys")?;
    let modulus = monkeys.iter().map(|monkey| monkey.divisor).product();

    let calm = monkey_business(monkeys.clone(), 20, Relief::Bored);
    let worried = monkey_business(monkeys, 10_000, Relief::Modulo(modulus));

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", calm, worried))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
