use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::Officer;
use crate::utils::tabular::parse_row;

/// Loads the officer roster: one `id,name,unit,rank,position` row per
/// officer, optional header row. Ids must be positive and unique; every
/// officer starts with an empty history and a zero score.
pub fn load_roster(path: &Path) -> Result<Vec<Officer>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;

    let mut officers = Vec::new();
    let mut seen = HashSet::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells = parse_row(line);
        if line_no == 0 && cells[0].trim().eq_ignore_ascii_case("id") {
            continue;
        }
        if cells.len() < 5 {
            bail!(
                "roster line {}: expected 5 cells, got {}",
                line_no + 1,
                cells.len()
            );
        }
        let id: i32 = cells[0].trim().parse().with_context(|| {
            format!("roster line {}: invalid officer id {:?}", line_no + 1, cells[0])
        })?;
        if id < 1 {
            bail!("roster line {}: officer id must be positive, got {}", line_no + 1, id);
        }
        if !seen.insert(id) {
            bail!("roster line {}: duplicate officer id {}", line_no + 1, id);
        }
        officers.push(Officer::new(
            id,
            cells[1].trim().to_string(),
            cells[2].trim().to_string(),
            cells[3].trim().to_string(),
            cells[4].trim().to_string(),
        ));
    }

    if officers.is_empty() {
        bail!("roster file {} contains no officers", path.display());
    }
    Ok(officers)
}
