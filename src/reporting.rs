use crate::collector::RunStats;
use crate::errors::RecopyError;
use std::io::Write;

/// Writes the statistics block printed by `--stats`.
pub fn write_stats<W: Write>(stats: &RunStats, out: &mut W) -> Result<(), RecopyError> {
    writeln!(out, "\nStatistics:")?;
    writeln!(out, "  Total files scanned: {}", stats.total)?;
    writeln!(out, "  Files copied: {}", stats.copied)?;
    writeln!(out, "  Files skipped: {}", stats.skipped)?;
    writeln!(out, "  Errors: {}", stats.errors)?;
    Ok(())
}

pub fn print_stats(stats: &RunStats) -> Result<(), RecopyError> {
    write_stats(stats, &mut std::io::stderr().lock())
}
