//! Area scope resolution
//!
//! Maps an actor's access grant to the set of worker records the actor may
//! see and act on, and resolves area ids to display names for reporting.

use crate::db::models::Area;
use shared::models::AreaScope;
use std::collections::HashMap;

/// Resolver over the current area catalogue
#[derive(Debug, Clone, Default)]
pub struct ScopeResolver {
    /// area id ("area:…") → display name
    names: HashMap<String, String>,
}

impl ScopeResolver {
    /// Build a resolver from the area catalogue
    pub fn new(areas: &[Area]) -> Self {
        let names = areas
            .iter()
            .filter_map(|area| {
                area.id
                    .as_ref()
                    .map(|id| (id.to_string(), area.name.clone()))
            })
            .collect();
        Self { names }
    }

    /// Human-readable name for an area id.
    ///
    /// Unknown ids degrade gracefully to displaying the raw id rather than
    /// failing.
    pub fn area_name(&self, area_id: &str) -> String {
        self.names
            .get(area_id)
            .cloned()
            .unwrap_or_else(|| area_id.to_string())
    }

    /// The set of area ids the actor may act on.
    ///
    /// `None` means unrestricted: every area, present or future. An
    /// explicit scope returns its parsed id set verbatim; ids unknown to
    /// the catalogue stay in the set (they may name future areas).
    pub fn visible_area_ids(&self, scope: &AreaScope) -> Option<Vec<String>> {
        match scope {
            AreaScope::All => None,
            AreaScope::Areas(set) => Some(set.iter().cloned().collect()),
        }
    }

    /// Whether the scope covers the given area id
    pub fn allows(&self, scope: &AreaScope, area_id: &str) -> bool {
        scope.allows(area_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;

    fn area(id: &str, name: &str) -> Area {
        Area {
            id: Some(RecordId::from_table_key("area", id)),
            name: name.to_string(),
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn resolves_known_names_and_degrades_unknown() {
        let resolver = ScopeResolver::new(&[area("1", "North District")]);
        let known_id = RecordId::from_table_key("area", "1").to_string();
        assert_eq!(resolver.area_name(&known_id), "North District");
        assert_eq!(resolver.area_name("area:999"), "area:999");
    }

    #[test]
    fn unrestricted_scope_has_no_id_filter() {
        let resolver = ScopeResolver::new(&[]);
        assert_eq!(resolver.visible_area_ids(&AreaScope::All), None);
    }

    #[test]
    fn explicit_scope_returns_its_set() {
        let resolver = ScopeResolver::new(&[]);
        let scope = AreaScope::parse("area:1, area:2");
        let ids = resolver.visible_area_ids(&scope).unwrap();
        assert_eq!(ids, vec!["area:1".to_string(), "area:2".to_string()]);
        assert!(resolver.allows(&scope, "area:1"));
        assert!(!resolver.allows(&scope, "area:3"));
    }
}
