//! Open/active bookkeeping for tabbed panes.

/// Tab ids in opening order plus the single visible one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabRegistry {
    open: Vec<String>,
    active: Option<String>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tab; returns `false` if it was already open.
    pub fn open(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.is_open(&id) {
            return false;
        }
        self.open.push(id);
        true
    }

    /// Makes `id` the only visible pane; unknown ids are ignored.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.is_open(id) {
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    /// Removes a tab. Closing the visible one activates the last remaining.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.open.len();
        self.open.retain(|t| t != id);
        if self.open.len() == before {
            return false;
        }
        if self.active.as_deref() == Some(id) {
            self.active = self.open.last().cloned();
        }
        true
    }

    /// Drops every tab, e.g. when another month is selected.
    pub fn reset(&mut self) {
        self.open.clear();
        self.active = None;
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|t| t == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn ids(&self) -> &[String] {
        &self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_pane_is_visible() {
        let mut tabs = TabRegistry::new();
        assert!(tabs.open("tab-Lương"));
        assert!(tabs.open("tab-Ăn uống"));
        assert!(tabs.open("new-item-tab"));
        assert!(!tabs.open("tab-Lương"));

        assert!(tabs.activate("tab-Ăn uống"));
        assert!(!tabs.activate("tab-missing"));
        let visible: Vec<_> = tabs.ids().iter().filter(|id| tabs.is_active(id)).collect();
        assert_eq!(visible, vec!["tab-Ăn uống"]);
    }

    #[test]
    fn closing_active_falls_back_and_reset_clears() {
        let mut tabs = TabRegistry::new();
        tabs.open("a");
        tabs.open("b");
        tabs.open("c");
        tabs.activate("c");
        assert!(tabs.close("c"));
        assert_eq!(tabs.active(), Some("b"));
        assert!(!tabs.close("c"));

        tabs.reset();
        assert!(tabs.ids().is_empty());
        assert_eq!(tabs.active(), None);
    }
}
