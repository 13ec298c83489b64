/// Tab identifiers of the catalog editor, in navigation order
pub const CATALOG_TABS: [(&str, &str); 4] = [
    ("settings", "Settings"),
    ("mapping", "Column Mapping"),
    ("data", "Catalog Data"),
    ("export", "Export"),
];

/// Navigation state: one active tab out of a fixed list, synced with the
/// URL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRouter {
    tabs: Vec<&'static str>,
    active: &'static str,
}

impl TabRouter {
    /// Start on the tab named by `hash`, else the first tab
    pub fn initial(tabs: &[&'static str], hash: &str) -> Self {
        let hash = hash.trim_start_matches('#');
        let active = tabs
            .iter()
            .copied()
            .find(|t| *t == hash)
            .or_else(|| tabs.first().copied())
            .unwrap_or_default();
        Self {
            tabs: tabs.to_vec(),
            active,
        }
    }

    pub fn active(&self) -> &'static str {
        self.active
    }

    /// Switch to a known tab; unknown ids and the current tab are no-ops
    pub fn activate(&mut self, id: &str) -> bool {
        match self.tabs.iter().copied().find(|t| *t == id) {
            Some(tab) if tab != self.active => {
                self.active = tab;
                true
            }
            _ => false,
        }
    }
}

pub fn catalog_tab_ids() -> Vec<&'static str> {
    CATALOG_TABS.iter().map(|(id, _)| *id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tab_from_hash() {
        let ids = catalog_tab_ids();
        assert_eq!(TabRouter::initial(&ids, "#data").active(), "data");
        assert_eq!(TabRouter::initial(&ids, "export").active(), "export");
        assert_eq!(TabRouter::initial(&ids, "#nope").active(), "settings");
        assert_eq!(TabRouter::initial(&ids, "").active(), "settings");
    }

    #[test]
    fn test_activate_known_tabs_only() {
        let ids = catalog_tab_ids();
        let mut router = TabRouter::initial(&ids, "");
        assert!(router.activate("mapping"));
        assert_eq!(router.active(), "mapping");
        assert!(!router.activate("mapping"));
        assert!(!router.activate("billing"));
        assert_eq!(router.active(), "mapping");
    }
}
