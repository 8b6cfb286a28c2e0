/*!
 * Script Runner
 * Replays requests against a memory manager
 */

use super::parser::parse;
use super::types::{CliResult, Request, Script};
use crate::core::types::Address;
use crate::memory::{BlockId, ManagerConfig, MemoryManager, MemoryStats};
use log::debug;
use std::io::Write;

/// Result of one allocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allocated(Address),
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Allocated(begin) => write!(f, "{}", begin),
            Outcome::Failed => write!(f, "-1"),
        }
    }
}

/// Replay a script on `manager`, returning one outcome per allocation request
pub fn run(manager: &mut MemoryManager, script: &Script) -> CliResult<Vec<Outcome>> {
    let mut handles: Vec<Option<BlockId>> = Vec::with_capacity(script.requests.len());
    let mut outcomes = Vec::new();

    for request in &script.requests {
        match *request {
            Request::Allocate(size) => {
                let handle = manager.allocate(size)?;
                let outcome = match handle.and_then(|id| manager.block(id)) {
                    Some(block) => Outcome::Allocated(block.begin),
                    None => Outcome::Failed,
                };
                outcomes.push(outcome);
                handles.push(handle);
            }
            Request::Free(target) => {
                let handle = handles[target - 1].take();
                if handle.is_none() {
                    debug!("Request {} has no live block to free", target);
                }
                manager.free(handle)?;
                handles.push(None);
            }
        }
    }

    Ok(outcomes)
}

/// Parse `input`, replay it on a fresh manager and write one line per allocation
pub fn execute<W: Write>(input: &str, out: &mut W) -> CliResult<MemoryStats> {
    let script = parse(input)?;
    let config =
        ManagerConfig::from_env(script.arena_size).with_allocation_hint(script.allocations());
    let mut manager = MemoryManager::with_config(config);

    for outcome in run(&mut manager, &script)? {
        writeln!(out, "{}", outcome)?;
    }

    Ok(manager.stats())
}
