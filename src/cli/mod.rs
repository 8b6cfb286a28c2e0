/*!
 * Request Script Adapter
 *
 * Drives a `MemoryManager` from a whitespace-separated integer script:
 *
 * ```text
 * N M r1 r2 ... rM
 * ```
 *
 * `N` is the arena size and `M` the number of requests. A positive `r` allocates that
 * many units and reports the block offset (or `-1`); a negative `r` frees the block
 * obtained by request number `|r|` (1-based). Freeing a request that failed, was a
 * free itself, or was already freed does nothing.
 */

mod parser;
mod runner;
mod types;

pub use parser::parse;
pub use runner::{execute, run, Outcome};
pub use types::{CliError, CliResult, Request, Script};
