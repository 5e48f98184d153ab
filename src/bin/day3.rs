use std::collections::HashSet;
use std::fmt::Display;

use anyhow::{bail, Context};
use lazy_format::lazy_format;

fn priority(item: char) -> anyhow::Result<u32> {
    match item {
        'a'..='z' => Ok(item as u32 - 'a' as u32 + 1),
        'A'..='Z' => Ok(item as u32 - 'A' as u32 + 27),
        _ => bail!("Unexpected item {:?}", item),
    }
}

/// The single item type shared by every one of `sets`
fn common_item<'a>(sets: impl IntoIterator<Item = &'a str>) -> Option<char> {
    sets.into_iter()
        .map(|items| items.chars().collect::<HashSet<char>>())
        .reduce(|common, items| &common & &items)?
        .into_iter()
        .next()
}

fn compartments(rucksack: &str) -> anyhow::Result<(&str, &str)> {
    if !rucksack.is_ascii() {
        bail!("Rucksack {:?} holds non-ASCII items", rucksack);
    }
    if rucksack.len() % 2 != 0 {
        bail!("Rucksack {:?} can't be split evenly", rucksack);
    }

    Ok(rucksack.split_at(rucksack.len() / 2))
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let rucksacks: Vec<&str> = input.lines().map(str::trim).collect();

    let mut misplaced = 0;
    for rucksack in &rucksacks {
        let (left, right) = compartments(rucksack)?;
        let item = common_item([left, right])
            .with_context(|| format!("No shared item in {:?}", rucksack))?;
        misplaced += priority(item)?;
    }

    let mut badges = 0;
    for group in rucksacks.chunks(3) {
        if group.len() != 3 {
            bail!("Trailing group of {} rucksacks", group.len());
        }
        let badge = common_item(group.iter().copied())
            .with_context(|| format!("No badge in group {:?}", group))?;
        badges += priority(badge)?;
    }

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", misplaced, badges))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        vJrwpWtwJgWrhcsFMMfFFhFp
        jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
        PmmdzqPrVvPwwTWBwg
        wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
        ttgJtRGJQctTZtZT
        CrZsJsPPZsGzwwsLwLmpwMDw
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        assert_eq!(answer, "Part 1: 157\nPart 2: 70");
    }

    #[test]
    fn priorities() {
        assert_eq!(priority('p').unwrap(), 16);
        assert_eq!(priority('L').unwrap(), 38);
        assert!(priority('?').is_err());
    }

    #[test]
    fn shared_item() {
        assert_eq!(common_item(["vJrwpWtwJgWr", "hcsFMMfFFhFp"]), Some('p'));
        assert_eq!(common_item(["abc", "def"]), None);
    }

    #[test]
    fn rejects_multibyte_items() {
        // Four bytes, but the midpoint falls inside the 'é'
        assert!(compartments("aéb").is_err());
        assert!(solve("aéb\nabab\ncdcd").is_err());
    }
}
