use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use anyhow::{bail, Context};
use joinery::prelude::*;
use lazy_format::lazy_format;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Packet {
    Integer(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Integer(lhs), Packet::Integer(rhs)) => lhs.cmp(rhs),
            (Packet::List(lhs), Packet::List(rhs)) => lhs.cmp(rhs),
            (Packet::Integer(lhs), Packet::List(rhs)) => {
                std::slice::from_ref(&Packet::Integer(*lhs)).cmp(rhs.as_slice())
            }
            (Packet::List(lhs), Packet::Integer(rhs)) => {
                lhs.as_slice().cmp(std::slice::from_ref(&Packet::Integer(*rhs)))
            }
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Packet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Packet::Integer(value) => value.fmt(f),
            Packet::List(items) => write!(f, "[{}]", items.iter().join_with(',')),
        }
    }
}

fn parse_packet(chars: &mut Peekable<Chars>) -> anyhow::Result<Packet> {
    match chars.peek() {
        Some('[') => {
            chars.next();
            let mut items = Vec::new();

            if chars.peek() == Some(&']') {
                chars.next();
                return Ok(Packet::List(items));
            }

            loop {
                items.push(parse_packet(chars)?);
                match chars.next() {
                    Some(',') => continue,
                    Some(']') => break Ok(Packet::List(items)),
                    other => bail!("Expected ',' or ']', found {:?}", other),
                }
            }
        }
        Some(c) if c.is_ascii_digit() => {
            let mut value: u32 = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                chars.next();
                value = value
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(digit))
                    .context("Integer overflows")?;
            }
            Ok(Packet::Integer(value))
        }
        other => bail!("Unexpected {:?} at start of packet", other),
    }
}

impl FromStr for Packet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut chars = s.trim().chars().peekable();
        let packet = parse_packet(&mut chars).with_context(|| format!("Invalid packet {:?}", s))?;

        match chars.next() {
            None => Ok(packet),
            Some(c) => bail!("Trailing {:?} after packet {:?}", c, s),
        }
    }
}

fn divider(value: u32) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Integer(value)])])
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let pairs: Vec<(Packet, Packet)> = input
        .split("\n\n")
        .map(|block| -> anyhow::Result<(Packet, Packet)> {
            let mut lines = block.lines().filter(|line| !line.trim().is_empty());
            match (lines.next(), lines.next(), lines.next()) {
                (Some(left), Some(right), None) => Ok((left.parse()?, right.parse()?)),
                _ => bail!("Expected a pair of packets in {:?}", block),
            }
        })
        .collect::<anyhow::Result<_>>()?;

    let ordered: usize = pairs
        .iter()
        .zip(1..)
        .filter(|((left, right), _)| left <= right)
        .map(|(_, index)| index)
        .sum();

    // Position of each divider once every packet is sorted: everything that
    // sorts before it, plus the dividers before it, plus one.
    let packets: Vec<&Packet> = pairs.iter().flat_map(|(left, right)| vec![left, right]).collect();
    let decoder_key: usize = [divider(2), divider(6)]
        .iter()
        .enumerate()
        .map(|(earlier_dividers, divider)| {
            let before = packets.iter().filter(|&&packet| packet < divider).count();
            before + earlier_dividers + 1
        })
        .product();

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", ordered, decoder_key))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
