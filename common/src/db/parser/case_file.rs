//! Case sets stored as TOML:
//!
//! ```toml
//! [[case]]
//! name = "schwierigkeit-sehrleicht_size-10_pins-4_kanten-13"
//! pins = [[0, 1], [4, 4], [8, 3], [2, 5]]
//!
//! [[case]]
//! name = "warmup"
//! size = 6
//! target = 4
//! pins = [[0, 0], [2, 2]]
//! ```
//!
//! `size`, `target` and `difficulty` fall back to the tags in the name.

use crate::db::case::{Case, CaseSet, NameTags};
use crate::db::indices::CaseId;
use crate::db::paths::dedup_pins;
use crate::geom::point::Point;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Deserialize, Serialize)]
struct CaseFile {
    #[serde(default, rename = "case")]
    cases: Vec<CaseRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CaseRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<usize>,
    pins: Vec<Point>,
}

pub fn parse(filename: &str, default_size: u32) -> Result<CaseSet> {
    let content = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read case file '{}'", filename))?;
    parse_str(&content, default_size).with_context(|| format!("Invalid case file '{}'", filename))
}

pub fn parse_str(content: &str, default_size: u32) -> Result<CaseSet> {
    let file: CaseFile = toml::from_str(content)?;
    let mut set = CaseSet::new();

    for record in file.cases {
        let tags = NameTags::parse(&record.name);
        let target = record
            .target
            .or_else(|| tags.target())
            .ok_or_else(|| anyhow!("Case '{}' has no target (set `target` or a `kanten-N` tag)", record.name))?;
        let size = record.size.or_else(|| tags.size()).unwrap_or(default_size);
        let difficulty = record
            .difficulty
            .or_else(|| tags.difficulty().map(str::to_string))
            .unwrap_or_default();

        let (pins, removed) = dedup_pins(&record.pins);
        if removed > 0 {
            log::warn!("Case '{}': dropped {} duplicate pin(s)", record.name, removed);
        }
        if let Some(expected) = tags.pins()
            && expected != pins.len()
        {
            log::warn!(
                "Case '{}' is tagged with {} pins but lists {}",
                record.name,
                expected,
                pins.len()
            );
        }

        set.add(Case {
            id: CaseId::default(),
            name: record.name,
            difficulty,
            size,
            target,
            pins,
        });
    }

    log::debug!("Parsed {} cases", set.len());
    Ok(set)
}

pub fn write(cases: &[Case], filename: &str) -> Result<()> {
    let file = CaseFile {
        cases: cases
            .iter()
            .map(|c| CaseRecord {
                name: c.name.clone(),
                difficulty: (!c.difficulty.is_empty()).then(|| c.difficulty.clone()),
                size: Some(c.size),
                target: Some(c.target),
                pins: c.pins.clone(),
            })
            .collect(),
    };
    let content = toml::to_string(&file)?;
    if let Some(parent) = Path::new(filename).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(filename, content).with_context(|| format!("Failed to write '{}'", filename))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[case]]
name = "schwierigkeit-sehrleicht_size-10_pins-4_kanten-13"
pins = [[0, 1], [4, 4], [8, 3], [2, 5]]

[[case]]
name = "warmup"
size = 6
target = 4
pins = [[0, 0], [2, 2], [0, 0]]
"#;

    #[test]
    fn reads_tags_and_explicit_fields() {
        let set = parse_str(SAMPLE, 11).unwrap();
        assert_eq!(set.len(), 2);

        let first = &set.cases[0];
        assert_eq!(first.target, 13);
        assert_eq!(first.size, 10);
        assert_eq!(first.difficulty, "sehrleicht");
        assert_eq!(first.pins[2], Point::new(8, 3));

        let warmup = set.get("warmup").unwrap();
        assert_eq!(warmup.size, 6);
        assert_eq!(warmup.target, 4);
        assert_eq!(warmup.pins.len(), 2);
        assert_eq!(warmup.id.index(), 1);
    }

    #[test]
    fn missing_target_is_an_error() {
        let content = "[[case]]\nname = \"anon\"\npins = [[0, 0], [1, 1]]\n";
        assert!(parse_str(content, 10).is_err());
    }

    #[test]
    fn write_then_parse_keeps_cases() {
        let set = parse_str(SAMPLE, 10).unwrap();
        let dir = std::env::temp_dir().join("pinboard_case_file_test");
        let path = dir.join("cases.toml");
        let path = path.to_str().unwrap();

        write(&set.cases, path).unwrap();
        let reread = parse(path, 10).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.cases[1].pins, set.cases[1].pins);
        assert_eq!(reread.cases[0].difficulty, "sehrleicht");
    }
}
