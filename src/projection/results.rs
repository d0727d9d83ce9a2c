//! Projection output structures

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Truncated 10th/50th/90th percentiles of a scenario's terminal values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub p10: i64,
    pub median: i64,
    pub p90: i64,
}

impl ScenarioSummary {
    pub const ZERO: ScenarioSummary = ScenarioSummary {
        p10: 0,
        median: 0,
        p90: 0,
    };

    /// Spread between the optimistic and pessimistic outcomes
    pub fn spread(&self) -> i64 {
        self.p90 - self.p10
    }
}

/// Scenario name -> summary, iterated in catalog order
///
/// Order is only for display; lookups go through [`ProjectionResult::get`].
/// Serializes as a JSON object keyed by scenario name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionResult {
    entries: Vec<(String, ScenarioSummary)>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace the summary for a scenario
    pub fn insert(&mut self, name: impl Into<String>, summary: ScenarioSummary) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = summary,
            None => self.entries.push((name, summary)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioSummary> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, summary)| summary)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScenarioSummary)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ScenarioSummary)> for ProjectionResult {
    fn from_iter<I: IntoIterator<Item = (String, ScenarioSummary)>>(iter: I) -> Self {
        let mut result = ProjectionResult::new();
        for (name, summary) in iter {
            result.insert(name, summary);
        }
        result
    }
}

impl Serialize for ProjectionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, summary) in &self.entries {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(p10: i64, median: i64, p90: i64) -> ScenarioSummary {
        ScenarioSummary { p10, median, p90 }
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut result = ProjectionResult::new();
        result.insert("Balanced", summary(1, 2, 3));
        result.insert("Aggressive", summary(4, 5, 6));
        result.insert("Balanced", summary(7, 8, 9));

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("Balanced"), Some(&summary(7, 8, 9)));
        assert_eq!(result.names().collect::<Vec<_>>(), ["Balanced", "Aggressive"]);
    }

    #[test]
    fn test_serializes_as_object_in_insertion_order() {
        let result: ProjectionResult = vec![
            ("Conservative".to_string(), summary(10, 20, 30)),
            ("Balanced".to_string(), summary(11, 21, 31)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"Conservative":{"p10":10,"median":20,"p90":30},"Balanced":{"p10":11,"median":21,"p90":31}}"#
        );
    }

    #[test]
    fn test_spread() {
        assert_eq!(summary(100, 150, 260).spread(), 160);
        assert_eq!(ScenarioSummary::ZERO.spread(), 0);
    }
}
