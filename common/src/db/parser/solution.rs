use crate::db::paths::PathSet;
use crate::geom::point::Point;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A solved case as written to the output directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub case: String,
    pub size: u32,
    pub target: usize,
    pub is_success: bool,
    pub paths_used: usize,
    pub iterations: u64,
    #[serde(default)]
    pub base_seed: u64,
    pub pins: Vec<Point>,
    pub paths: PathSet,
}

pub fn save(record: &SolutionRecord, filename: &str) -> Result<()> {
    let content = toml::to_string(record)?;
    if let Some(parent) = Path::new(filename).parent()
        && !parent.exists()
        && !parent.as_os_str().is_empty()
    {
        log::info!("Creating output directory: {:?}", parent);
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(filename, content)
        .with_context(|| format!("Failed to write solution '{}'", filename))?;
    Ok(())
}

pub fn load(filename: &str) -> Result<SolutionRecord> {
    let content = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read solution '{}'", filename))?;
    let record = toml::from_str(&content)
        .with_context(|| format!("Invalid solution file '{}'", filename))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::segment::PathElement;

    #[test]
    fn paths_are_nested_coordinate_arrays() {
        let content = r#"
case = "tiny"
size = 10
target = 2
is_success = true
paths_used = 2
iterations = 1
pins = [[0, 0], [1, 1]]
paths = [[[0, 0], [1, 0]], [[1, 1], [1, 0]]]
"#;
        let record: SolutionRecord = toml::from_str(content).unwrap();
        assert_eq!(record.paths.len(), 2);
        assert_eq!(
            record.paths.as_slice()[1],
            PathElement::new(Point::new(1, 0), Point::new(1, 1))
        );
        assert_eq!(record.pins[1], Point::new(1, 1));
        assert_eq!(record.base_seed, 0);
    }
}
