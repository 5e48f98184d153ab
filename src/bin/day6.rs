use std::collections::HashSet;
use std::fmt::Display;

use anyhow::Context;
use joinery::prelude::*;
use lazy_format::lazy_format;

const PACKET_MARKER: usize = 4;
const MESSAGE_MARKER: usize = 14;

/// Number of characters read once the first window of `size` distinct
/// characters has been seen.
fn marker_end(signal: &str, size: usize) -> Option<usize> {
    let chars: Vec<char> = signal.chars().collect();

    chars
        .windows(size)
        .position(|window| window.iter().collect::<HashSet<_>>().len() == size)
        .map(|start| start + size)
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let mut packets = Vec::new();
    let mut messages = Vec::new();

    for signal in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        packets.push(
            marker_end(signal, PACKET_MARKER)
                .with_context(|| format!("No start-of-packet marker in {:?}", signal))?,
        );
        messages.push(
            marker_end(signal, MESSAGE_MARKER)
                .with_context(|| format!("No start-of-message marker in {:?}", signal))?,
        );
    }

    let packets = packets.join_with(", ");
    let messages = messages.join_with(", ");

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", packets, messages))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
