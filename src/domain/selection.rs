//! Checkbox-group selection state.
//!
//! The TUI owns one `FacetGroup` per facet panel; reading the current
//! selection out of a group is a pure operation with no side effects.

/// One selectable facet entry.
///
/// `raw` is the value submitted to the service; `label` is the cosmetic
/// display form. The two may differ (capitalized crime types keep their raw
/// lowercase submission value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetToggle {
    pub raw: String,
    pub label: String,
    pub checked: bool,
}

impl FacetToggle {
    pub fn new(raw: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            label: label.into(),
            checked: false,
        }
    }
}

/// An ordered group of facet toggles.
#[derive(Debug, Clone, Default)]
pub struct FacetGroup {
    entries: Vec<FacetToggle>,
}

impl FacetGroup {
    pub fn new(entries: Vec<FacetToggle>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FacetToggle] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw values of the checked entries, in control order.
    ///
    /// An empty group yields an empty set, not an error.
    pub fn selected(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| entry.raw.clone())
            .collect()
    }

    /// Flip one entry. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.checked = !entry.checked;
        }
    }

    /// Set every entry to `checked`, mirroring a "select all" control.
    ///
    /// Selection changes never trigger a query by themselves.
    pub fn set_all(&mut self, checked: bool) {
        for entry in &mut self.entries {
            entry.checked = checked;
        }
    }

    pub fn all_checked(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|entry| entry.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(values: &[&str]) -> FacetGroup {
        FacetGroup::new(values.iter().map(|v| FacetToggle::new(*v, *v)).collect())
    }

    #[test]
    fn empty_group_reads_as_empty_selection() {
        assert!(FacetGroup::default().selected().is_empty());
    }

    #[test]
    fn selected_returns_checked_values_in_control_order() {
        let mut g = group(&["burglary", "arson", "theft"]);
        g.toggle(2);
        g.toggle(0);
        assert_eq!(g.selected(), vec!["burglary".to_string(), "theft".to_string()]);
    }

    #[test]
    fn set_all_matches_the_select_all_control() {
        let mut g = group(&["a", "b", "c"]);
        g.set_all(true);
        assert!(g.all_checked());
        assert_eq!(g.selected().len(), 3);
        g.set_all(false);
        assert!(g.selected().is_empty());
        assert!(!g.all_checked());
    }

    #[test]
    fn toggle_ignores_out_of_range_index() {
        let mut g = group(&["a"]);
        g.toggle(5);
        assert!(g.selected().is_empty());
    }
}
