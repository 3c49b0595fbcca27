use crate::db::indices::CaseId;
use crate::geom::point::Point;
use std::collections::HashMap;

/// One puzzle: pins to connect on a board of `size`, and the segment count
/// a solution should not exceed.
#[derive(Clone, Debug)]
pub struct Case {
    pub id: CaseId,
    pub name: String,
    pub difficulty: String,
    pub size: u32,
    pub target: usize,
    pub pins: Vec<Point>,
}

/// `key-value` tags packed into a case name, e.g.
/// `schwierigkeit-leicht_size-10_pins-6_kanten-23`.
#[derive(Clone, Debug, Default)]
pub struct NameTags {
    tags: HashMap<String, String>,
}

impl NameTags {
    pub fn parse(name: &str) -> Self {
        let tags = name
            .split('_')
            .filter_map(|part| part.split_once('-'))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { tags }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.get("schwierigkeit")
    }

    pub fn size(&self) -> Option<u32> {
        self.get("size").and_then(|v| v.parse().ok())
    }

    pub fn pins(&self) -> Option<usize> {
        self.get("pins").and_then(|v| v.parse().ok())
    }

    /// Target segment count ("kanten" = edges).
    pub fn target(&self) -> Option<usize> {
        self.get("kanten").and_then(|v| v.parse().ok())
    }
}

#[derive(Clone, Debug, Default)]
pub struct CaseSet {
    pub cases: Vec<Case>,
    name_map: HashMap<String, CaseId>,
}

impl CaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut case: Case) -> CaseId {
        let id = CaseId::new(self.cases.len());
        case.id = id;
        self.name_map.insert(case.name.clone(), id);
        self.cases.push(case);
        id
    }

    pub fn get(&self, name: &str) -> Option<&Case> {
        self.name_map.get(name).map(|id| &self.cases[id.index()])
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.cases.iter()
    }
}
