use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::{bail, Context};
use lazy_format::lazy_format;

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Noop,
    AddX(i64),
}

impl Instruction {
    fn cycles(self) -> usize {
        match self {
            Instruction::Noop => 1,
            Instruction::AddX(_) => 2,
        }
    }
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("noop"), None, None) => Ok(Instruction::Noop),
            (Some("addx"), Some(value), None) => Ok(Instruction::AddX(
                value
                    .parse()
                    .with_context(|| format!("Invalid addx operand in {:?}", line))?,
            )),
            _ => bail!("Unsupported instruction: {:?}", line),
        }
    }
}

/// Value of the X register during each cycle, starting with cycle 1.
fn register_values(program: &[Instruction]) -> Vec<i64> {
    let mut x = 1;
    let mut values = Vec::with_capacity(program.len() * 2);

    for &instruction in program {
        for _ in 0..instruction.cycles() {
            values.push(x);
        }
        if let Instruction::AddX(value) = instruction {
            x += value;
        }
    }

    values
}

fn signal_strength(values: &[i64]) -> i64 {
    values
        .iter()
        .zip(1..)
        .skip(19)
        .step_by(40)
        .take(6)
        .map(|(&x, cycle)| cycle * x)
        .sum()
}

struct Screen {
    pixels: Vec<bool>,
}

impl Screen {
    fn draw(values: &[i64]) -> Self {
        let pixels = values
            .iter()
            .take(SCREEN_WIDTH * SCREEN_HEIGHT)
            .enumerate()
            .map(|(cycle, &x)| ((cycle % SCREEN_WIDTH) as i64 - x).abs() <= 1)
            .collect();

        Screen { pixels }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for row in self.pixels.chunks(SCREEN_WIDTH) {
            '\n'.fmt(f)?;
            for &lit in row {
                (if lit { '#' } else { '.' }).fmt(f)?;
            }
        }

        Ok(())
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let program: Vec<Instruction> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    let values = register_values(&program);
    let strength = signal_strength(&values);
    let screen = Screen::draw(&values);

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", strength, screen))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        addx 15
        addx -11
        addx 6
        addx -3
        addx 5
        addx -1
        addx -8
        addx 13
        addx 4
        noop
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx -35
        addx 1
        addx 24
        addx -19
        addx 1
        addx 16
        addx -11
        noop
        noop
        addx 21
        addx -15
        noop
        noop
        addx -3
        addx 9
        addx 1
        addx -3
        addx 8
        addx 1
        addx 5
        noop
        noop
        noop
        noop
        noop
        addx -36
        noop
        addx 1
        addx 7
        noop
        noop
        noop
        addx 2
        addx 6
        noop
        noop
        noop
        noop
        noop
        addx 1
        noop
        noop
        addx 7
        addx 1
        noop
        addx -13
        addx 13
        addx 7
        noop
        addx 1
        addx -33
        noop
        noop
        noop
        addx 2
        noop
        noop
        noop
        addx 8
        noop
        addx -1
        addx 2
        addx 1
        noop
        addx 17
        addx -9
        addx 1
        addx 1
        addx -3
        addx 11
        noop
        noop
        addx 1
        noop
        addx 1
        noop
        noop
        addx -13
        addx -19
        addx 1
        addx 3
        addx 26
        addx -30
        addx 12
        addx -1
        addx 3
        addx 1
        noop
        noop
        noop
        addx -9
        addx 18
        addx 1
        addx 2
        noop
        noop
        addx 9
        noop
        noop
        noop
        addx -1
        addx 2
        addx -37
        addx 1
        addx 3
        noop
        addx 15
        addx -21
        addx 22
        addx -6
        addx 1
        noop
        addx 2
        addx 1
        noop
        addx -10
        noop
        noop
        addx 20
        addx 1
        addx 2
        addx 2
        addx -6
        addx -11
        noop
        noop
        noop
    "};

    #[test]
    fn sample() {
        let answer = solve(SAMPLE.trim_end()).unwrap().to_string();
        let picture = indoc! {"
            ##..##..##..##..##..##..##..##..##..##..
            ###...###...###...###...###...###...###.
            ####....####....####....####....####....
            #####.....#####.....#####.....#####.....
            ######......######......######......####
            #######.......#######.......#######.....
        "};

        assert_eq!(
            answer,
            format!("Part 1: 13140\nPart 2: \n{}", picture.trim_end())
        );
    }

    #[test]
    fn small_program() {
        let program: Vec<Instruction> = ["noop", "addx 3", "addx -5"]
            .iter()
            .map(|line| line.parse().unwrap())
            .collect();

        assert_eq!(register_values(&program), vec![1, 1, 1, 4, 4]);
    }

    #[test]
    fn constant_register() {
        let input = vec!["noop"; 240].join("\n");
        let answer = solve(&input).unwrap().to_string();

        let row = format!("###{}", ".".repeat(37));
        let expected = format!("Part 1: 720\nPart 2: {}", format!("\n{}", row).repeat(6));
        assert_eq!(answer, expected);
    }

    #[test]
    fn sprite_follows_register() {
        // X jumps to 6 after the first two cycles, past the next three pixels
        let values = register_values(&[
            Instruction::AddX(5),
            Instruction::Noop,
            Instruction::Noop,
            Instruction::Noop,
        ]);
        let screen = Screen::draw(&values);
        assert_eq!(screen.to_string(), "\n##...");
    }

    #[test]
    fn signal_strength_samples_cycles() {
        let mut values = vec![0; 220];
        values[19] = 21;
        values[59] = 19;
        values[99] = 18;
        values[139] = 21;
        values[179] = 16;
        values[219] = 18;

        assert_eq!(signal_strength(&values), 13140);
    }

    #[test]
    fn rejects_unknown_instruction() {
        assert!("mulx 3".parse::<Instruction>().is_err());
        assert!("addx".parse::<Instruction>().is_err());
        assert!("noop 1".parse::<Instruction>().is_err());
    }
}
