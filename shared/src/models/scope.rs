//! Area scope encoding
//!
//! An actor's scope is stored as a single string: one area id, a
//! comma-joined list of area ids, or the literal `"ALL"` sentinel which
//! grants access to every area, present or future.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Scope sentinel granting access to every area
pub const SCOPE_ALL: &str = "ALL";

/// The set of areas an actor may see/act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaScope {
    /// Unrestricted — every area, present or future
    All,
    /// Explicit set of area ids
    Areas(BTreeSet<String>),
}

impl AreaScope {
    /// Parse the stored scope string.
    ///
    /// Comma-joined lists are split with per-entry whitespace trimming;
    /// empty entries are dropped. An empty string parses to an empty set
    /// (the actor sees nothing), never to `All`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == SCOPE_ALL {
            return AreaScope::All;
        }
        let areas = trimmed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        AreaScope::Areas(areas)
    }

    /// Encode back to the stored string form
    pub fn encode(&self) -> String {
        match self {
            AreaScope::All => SCOPE_ALL.to_string(),
            AreaScope::Areas(set) => set.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }

    /// Whether the scope covers the given area id
    pub fn allows(&self, area_id: &str) -> bool {
        match self {
            AreaScope::All => true,
            AreaScope::Areas(set) => set.contains(area_id),
        }
    }

    /// Whether the scope is the unrestricted sentinel
    pub fn is_all(&self) -> bool {
        matches!(self, AreaScope::All)
    }
}

impl Serialize for AreaScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AreaScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AreaScope::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sentinel() {
        assert_eq!(AreaScope::parse("ALL"), AreaScope::All);
        assert!(AreaScope::parse(" ALL ").allows("anything"));
    }

    #[test]
    fn parses_single_area() {
        let scope = AreaScope::parse("area:12");
        assert!(scope.allows("area:12"));
        assert!(!scope.allows("area:13"));
    }

    #[test]
    fn parses_comma_list_with_whitespace() {
        let scope = AreaScope::parse("area:1, area:2 ,area:3,");
        assert!(scope.allows("area:1"));
        assert!(scope.allows("area:2"));
        assert!(scope.allows("area:3"));
        assert!(!scope.allows("area:4"));
    }

    #[test]
    fn empty_scope_sees_nothing() {
        let scope = AreaScope::parse("");
        assert!(!scope.allows("area:1"));
        assert!(!scope.is_all());
    }

    #[test]
    fn encode_round_trips() {
        for raw in ["ALL", "area:1", "area:1,area:2"] {
            assert_eq!(AreaScope::parse(raw).encode(), raw);
        }
    }
}
