/*!
 * QuickHeap Allocator - Request Script Runner
 *
 * Reads `N M r1 ... rM` from stdin and prints one offset (or -1) per allocation.
 */

use miette::{IntoDiagnostic, Result};
use std::io::{self, BufWriter, Read, Write};
use tracing::{info, warn};

use qhalloc::{cli, init_tracing};

/// Environment switch for logging final arena statistics
const STATS_ENV: &str = "QHALLOC_STATS";

fn main() -> Result<()> {
    init_tracing();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).into_diagnostic()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = cli::execute(&input, &mut out)?;
    out.flush().into_diagnostic()?;

    let want_stats = std::env::var(STATS_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if want_stats {
        match serde_json::to_string(&stats) {
            Ok(json) => info!(stats = %json, "Final arena statistics"),
            Err(e) => warn!(error = %e, "Could not serialize arena statistics"),
        }
    }

    Ok(())
}
