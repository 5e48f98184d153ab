use std::fmt::Display;

use anyhow::Context;
use lazy_format::lazy_format;

#[derive(Debug, Clone, Default)]
struct Elf {
    calories: Vec<u64>,
}

impl Elf {
    fn total(&self) -> u64 {
        self.calories.iter().sum()
    }
}

fn parse_elves(input: &str) -> anyhow::Result<Vec<Elf>> {
    input
        .split("\n\n")
        .filter(|group| !group.trim().is_empty())
        .map(|group| {
            group
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| {
                    line.trim()
                        .parse::<u64>()
                        .with_context(|| format!("Invalid calorie count {:?}", line))
                })
                .collect::<anyhow::Result<_>>()
                .map(|calories| Elf { calories })
        })
        .collect()
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let mut totals: Vec<u64> = parse_elves(input)?.iter().map(Elf::total).collect();
    totals.sort_unstable_by(|a, b| b.cmp(a));

    let most = totals.first().copied().context("No elves in input")?;
    let top_three: u64 = totals.iter().take(3).sum();

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", most, top_three))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        1000
        2000
        3000

        4000

        5000
        6000

        7000
        8000
        9000

        10000
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 24000\nPart 2: 45000");
    }

    #[test]
    fn trailing_group_counts() {
        let elves = parse_elves("1\n2\n\n30").unwrap();
        assert_eq!(elves.len(), 2);
        assert_eq!(elves[1].total(), 30);
    }

    #[test]
    fn empty_input_has_no_elves() {
        assert!(parse_elves("").unwrap().is_empty());
        assert!(solve("").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(solve("100\nlots").is_err());
    }
}
