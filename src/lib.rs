//! Shared plumbing for the day binaries in `src/bin`: reading the puzzle
//! input, timing the solver, and pulling typed fields out of regex
//! captures. Puzzle logic lives in the binaries themselves.

#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

pub mod extract;
pub mod harness;

pub use extract::{captures, ExtractError, RegexExtractor};
pub use harness::{run, run_with, timed, InputArgs, ReadString};
