//! Multi-item selection over the current listing.

use std::collections::HashSet;

use crate::models::EntryKey;

/// Selected entries plus the anchor used for shift-range selection.
///
/// Keys always belong to the listing currently shown; the session clears
/// the model whenever that listing is replaced.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    selected: HashSet<EntryKey>,
    anchor: Option<EntryKey>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_only(&mut self, key: EntryKey) {
        self.selected.clear();
        self.selected.insert(key.clone());
        self.anchor = Some(key);
    }

    pub fn toggle(&mut self, key: EntryKey) {
        if self.selected.remove(&key) {
            if self.selected.is_empty() {
                self.anchor = None;
            }
        } else {
            if self.selected.is_empty() {
                self.anchor = Some(key.clone());
            }
            self.selected.insert(key);
        }
    }

    /// Add every key between the anchor and `key` (inclusive) in `ordered`.
    ///
    /// Positions come from the rendered order, so the result depends on the
    /// active sort. Without an anchor (or with one that is not rendered)
    /// this is [`select_only`](Self::select_only). A `key` that is not in
    /// `ordered` leaves the selection untouched.
    pub fn select_range(&mut self, key: &EntryKey, ordered: &[EntryKey]) {
        let Some(target) = ordered.iter().position(|k| k == key) else {
            return;
        };
        let origin = self
            .anchor
            .as_ref()
            .and_then(|anchor| ordered.iter().position(|k| k == anchor));
        let Some(origin) = origin else {
            self.select_only(key.clone());
            return;
        };

        let (start, end) = (origin.min(target), origin.max(target));
        self.selected.extend(ordered[start..=end].iter().cloned());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    pub fn select_all(&mut self, ordered: &[EntryKey]) {
        self.selected = ordered.iter().cloned().collect();
        self.anchor = ordered.last().cloned();
    }

    pub fn is_selected(&self, key: &EntryKey) -> bool {
        self.selected.contains(key)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn anchor(&self) -> Option<&EntryKey> {
        self.anchor.as_ref()
    }

    /// Selected keys in `ordered` order; keys not rendered are skipped.
    pub fn in_order(&self, ordered: &[EntryKey]) -> Vec<EntryKey> {
        ordered
            .iter()
            .filter(|k| self.selected.contains(*k))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryKey> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VirtualPath;

    fn key(name: &str) -> EntryKey {
        EntryKey::new(VirtualPath::root(), name)
    }

    fn keys(names: &[&str]) -> Vec<EntryKey> {
        names.iter().map(|n| key(n)).collect()
    }

    #[test]
    fn test_select_only_replaces_selection() {
        let mut sel = SelectionModel::new();
        sel.select_only(key("a"));
        sel.select_only(key("b"));
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(&key("b")));
        assert_eq!(sel.anchor(), Some(&key("b")));
    }

    #[test]
    fn test_toggle_manages_anchor() {
        let mut sel = SelectionModel::new();
        sel.toggle(key("a"));
        assert_eq!(sel.anchor(), Some(&key("a")));

        sel.toggle(key("b"));
        assert_eq!(sel.count(), 2);
        assert_eq!(sel.anchor(), Some(&key("a")));

        sel.toggle(key("a"));
        sel.toggle(key("b"));
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
    }

    #[test]
    fn test_range_without_anchor_selects_only() {
        let ordered = keys(&["a", "b", "c"]);
        let mut sel = SelectionModel::new();
        sel.select_range(&key("c"), &ordered);
        assert_eq!(sel.count(), 1);
        assert_eq!(sel.anchor(), Some(&key("c")));
    }

    #[test]
    fn test_range_spans_both_directions() {
        let ordered = keys(&["a", "b", "c", "d", "e"]);
        let mut sel = SelectionModel::new();
        sel.select_only(key("d"));
        sel.select_range(&key("b"), &ordered);
        assert_eq!(sel.in_order(&ordered), keys(&["b", "c", "d"]));
        assert_eq!(sel.anchor(), Some(&key("d")));
    }

    #[test]
    fn test_range_is_idempotent() {
        let ordered = keys(&["a", "b", "c", "d"]);
        let mut sel = SelectionModel::new();
        sel.select_only(key("a"));
        sel.select_range(&key("c"), &ordered);
        let first = sel.in_order(&ordered);
        sel.select_range(&key("c"), &ordered);
        assert_eq!(sel.in_order(&ordered), first);
        assert_eq!(sel.count(), 3);
    }

    #[test]
    fn test_range_follows_rendered_order() {
        let ascending = keys(&["a", "b", "c", "d"]);
        let descending = keys(&["d", "c", "b", "a"]);

        let mut sel = SelectionModel::new();
        sel.select_only(key("b"));
        sel.select_range(&key("d"), &ascending);
        assert_eq!(sel.count(), 3);

        let mut sel = SelectionModel::new();
        sel.select_only(key("b"));
        sel.select_range(&key("a"), &descending);
        assert_eq!(sel.in_order(&ascending), keys(&["a", "b"]));
    }

    #[test]
    fn test_range_ignores_unrendered_target() {
        let ordered = keys(&["a", "b"]);
        let mut sel = SelectionModel::new();
        sel.select_only(key("a"));
        sel.select_range(&key("zzz"), &ordered);
        assert_eq!(sel.count(), 1);
    }

    #[test]
    fn test_select_all_and_clear() {
        let ordered = keys(&["a", "b", "c"]);
        let mut sel = SelectionModel::new();
        sel.select_all(&ordered);
        assert_eq!(sel.count(), 3);
        assert_eq!(sel.anchor(), Some(&key("c")));

        sel.clear();
        assert_eq!(sel.count(), 0);
        assert_eq!(sel.anchor(), None);
    }
}
