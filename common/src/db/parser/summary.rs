//! Per-run results table, written as CSV next to the solution files.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SummaryRow {
    pub id: usize,
    pub name: String,
    pub difficulty: String,
    pub size: u32,
    pub pins: usize,
    pub target: usize,
    pub is_success: bool,
    pub paths_used: usize,
    pub iterations: u64,
    pub base_seed: u64,
    pub elapsed: Duration,
}

const HEADER: &str =
    "ID,name,difficulty,size,pins,target,is_successful,paths_used,iterations,seed,time";

/// `dir/stem.ext`, or `dir/stem_N.ext` with the first free `N` if taken.
pub fn unique_filename(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{}.{}", stem, ext));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn to_csv(rows: &[SummaryRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(HEADER);
    out.push('\n');
    for r in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{:.3}",
            r.id,
            field(&r.name),
            field(&r.difficulty),
            r.size,
            r.pins,
            r.target,
            r.is_success,
            r.paths_used,
            r.iterations,
            r.base_seed,
            r.elapsed.as_secs_f64()
        );
    }
    out
}

/// Writes the table to a fresh `summary*.csv` in `dir` and returns its path.
pub fn save(rows: &[SummaryRow], dir: &str) -> Result<PathBuf> {
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;
    let path = unique_filename(dir, "summary", "csv");
    std::fs::write(&path, to_csv(rows))
        .with_context(|| format!("Failed to write summary {:?}", path))?;
    Ok(path)
}
