use std::collections::HashMap;
use std::fmt::Display;

use anyhow::{bail, Context};
use lazy_format::lazy_format;
use tracing::debug;

const DISK_SIZE: u64 = 70_000_000;
const REQUIRED_FREE: u64 = 30_000_000;
const SMALL_DIRECTORY: u64 = 100_000;

type DirId = usize;

#[derive(Debug, Clone, Default)]
struct Directory {
    name: String,
    parent: Option<DirId>,
    children: HashMap<String, DirId>,
    files: HashMap<String, u64>,
}

/// Directory tree built from a terminal transcript. Directories live in a
/// flat arena and refer to each other by index; the root is index 0.
#[derive(Debug, Clone)]
struct FileSystem {
    directories: Vec<Directory>,
}

const ROOT: DirId = 0;

impl FileSystem {
    fn new() -> Self {
        FileSystem {
            directories: vec![Directory {
                name: String::from("/"),
                ..Directory::default()
            }],
        }
    }

    fn subdirectory(&mut self, parent: DirId, name: &str) -> DirId {
        if let Some(&id) = self.directories[parent].children.get(name) {
            return id;
        }

        let id = self.directories.len();
        self.directories.push(Directory {
            name: name.to_owned(),
            parent: Some(parent),
            ..Directory::default()
        });
        self.directories[parent].children.insert(name.to_owned(), id);
        id
    }

    fn path(&self, mut id: DirId) -> String {
        let mut parts = Vec::new();
        while let Some(parent) = self.directories[id].parent {
            parts.push(self.directories[id].name.as_str());
            id = parent;
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    fn from_transcript(transcript: &str) -> anyhow::Result<Self> {
        let mut fs = FileSystem::new();
        let mut cwd = ROOT;

        for line in transcript.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(target) = line.strip_prefix("$ cd ") {
                cwd = match target.trim() {
                    "/" => ROOT,
                    ".." => fs.directories[cwd]
                        .parent
                        .context("Can't 'cd ..' beyond root")?,
                    name => *fs.directories[cwd].children.get(name).with_context(|| {
                        format!(
                            "Can't 'cd {}', directory is unknown. Currently at {}",
                            name,
                            fs.path(cwd)
                        )
                    })?,
                };
            } else if line == "$ ls" {
                // Listing lines follow; nothing to do until they arrive
            } else if line.starts_with('$') {
                bail!("Unsupported command: {}", line);
            } else {
                let (size_or_dir, name) = line
                    .split_once(' ')
                    .with_context(|| format!("Malformed listing line {:?}", line))?;

                if size_or_dir == "dir" {
                    fs.subdirectory(cwd, name);
                } else {
                    let size = size_or_dir
                        .parse::<u64>()
                        .with_context(|| format!("Invalid file size in {:?}", line))?;
                    fs.directories[cwd]
                        .files
                        .entry(name.to_owned())
                        .or_insert(size);
                }
            }
        }

        Ok(fs)
    }

    /// Total size of every directory, indexed by `DirId`. Children always
    /// have a larger id than their parent, so one reverse pass suffices.
    fn total_sizes(&self) -> Vec<u64> {
        let mut totals: Vec<u64> = self
            .directories
            .iter()
            .map(|dir| dir.files.values().sum())
            .collect();

        for id in (1..self.directories.len()).rev() {
            if let Some(parent) = self.directories[id].parent {
                totals[parent] += totals[id];
            }
        }

        totals
    }
}

#[inline(always)]
fn solve(input: &str) -> anyhow::Result<impl Display> {
    let fs = FileSystem::from_transcript(input)?;
    let totals = fs.total_sizes();

    let small: u64 = totals.iter().filter(|&&size| size <= SMALL_DIRECTORY).sum();

    let in_use = totals[ROOT];
    let available = DISK_SIZE.saturating_sub(in_use);
    let to_free = REQUIRED_FREE.saturating_sub(available);
    debug!(in_use, available, to_free, "filesystem usage");

    let (victim, freed) = totals
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, size)| size >= to_free)
        .min_by_key(|&(_, size)| size)
        .context("No directory is large enough to delete")?;
    debug!(path = %fs.path(victim), freed, "directory to delete");

    Ok(lazy_format!("Part 1: {}\nPart 2: {}", small, freed))
}

fn main() -> anyhow::Result<()> {
    advent2022::run(solve)
}
