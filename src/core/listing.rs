//! Last-fetched directory listing and its derived display order.

use std::cmp::Ordering;

use crate::models::{Entry, EntryKey, EntryKind, SortDirection, SortKey, VirtualPath};

/// Holds the current listing; the display order is always derived.
#[derive(Clone, Debug, Default)]
pub struct ListingView {
    path: VirtualPath,
    entries: Vec<Entry>,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing and its path in one step.
    pub fn set_entries(&mut self, entries: Vec<Entry>, path: VirtualPath) {
        self.entries = entries;
        self.path = path;
    }

    pub fn path(&self) -> &VirtualPath {
        &self.path
    }

    /// Entries in fetch order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Sorted, filtered view over the stored entries.
    ///
    /// Directories always come first. Within each kind entries compare by
    /// `key`, reversed for descending order; equal entries keep fetch
    /// order. A non-blank `filter` keeps names containing it, ignoring case.
    pub fn view(&self, key: SortKey, direction: SortDirection, filter: &str) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            kind_rank(a.kind).cmp(&kind_rank(b.kind)).then_with(|| {
                let ord = compare_by(key, a, b);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            })
        });

        let query = filter.trim().to_lowercase();
        if query.is_empty() {
            return sorted;
        }
        sorted
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Keys of [`view`](Self::view), in the same order.
    pub fn ordered_keys(
        &self,
        key: SortKey,
        direction: SortDirection,
        filter: &str,
    ) -> Vec<EntryKey> {
        self.view(key, direction, filter)
            .into_iter()
            .map(|e| e.key(&self.path))
            .collect()
    }
}

fn kind_rank(kind: EntryKind) -> u8 {
    match kind {
        EntryKind::Directory => 0,
        EntryKind::File => 1,
    }
}

fn compare_by(key: SortKey, a: &Entry, b: &Entry) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
        SortKey::ModifiedAt => a.modified_at.cmp(&b.modified_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(entries: Vec<Entry>) -> ListingView {
        let mut view = ListingView::new();
        view.set_entries(entries, VirtualPath::new("/docs"));
        view
    }

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| {
                let prefix = if e.is_dir() { "dir" } else { "file" };
                format!("{}:{}", prefix, e.name)
            })
            .collect()
    }

    #[test]
    fn test_directories_first_by_name() {
        let view = listing(vec![
            Entry::directory("b", None),
            Entry::file("a", 1, None),
            Entry::directory("a", None),
        ]);
        let sorted = view.view(SortKey::Name, SortDirection::Ascending, "");
        assert_eq!(names(&sorted), vec!["dir:a", "dir:b", "file:a"]);
    }

    #[test]
    fn test_descending_keeps_directories_first() {
        let view = listing(vec![
            Entry::file("x.txt", 1, None),
            Entry::directory("a", None),
            Entry::directory("b", None),
            Entry::file("y.txt", 1, None),
        ]);
        let sorted = view.view(SortKey::Name, SortDirection::Descending, "");
        assert_eq!(
            names(&sorted),
            vec!["dir:b", "dir:a", "file:y.txt", "file:x.txt"]
        );
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let view = listing(vec![
            Entry::file("beta", 0, None),
            Entry::file("Alpha", 0, None),
            Entry::file("gamma", 0, None),
        ]);
        let sorted = view.view(SortKey::Name, SortDirection::Ascending, "");
        assert_eq!(names(&sorted), vec!["file:Alpha", "file:beta", "file:gamma"]);
    }

    #[test]
    fn test_size_sort_treats_missing_as_zero() {
        let mut unknown = Entry::file("unknown", 0, None);
        unknown.size = None;
        let view = listing(vec![
            Entry::file("big", 500, None),
            unknown,
            Entry::file("small", 5, None),
        ]);
        let sorted = view.view(SortKey::Size, SortDirection::Ascending, "");
        assert_eq!(names(&sorted), vec!["file:unknown", "file:small", "file:big"]);
    }

    #[test]
    fn test_modified_sort_is_chronological() {
        let view = listing(vec![
            Entry::file("new", 0, Some(300)),
            Entry::file("old", 0, Some(100)),
            Entry::file("mid", 0, Some(200)),
        ]);
        let sorted = view.view(SortKey::ModifiedAt, SortDirection::Descending, "");
        assert_eq!(names(&sorted), vec!["file:new", "file:mid", "file:old"]);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let view = listing(vec![
            Entry::file("first", 10, None),
            Entry::file("second", 10, None),
            Entry::file("third", 10, None),
        ]);
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = view.view(SortKey::Size, direction, "");
            assert_eq!(
                names(&sorted),
                vec!["file:first", "file:second", "file:third"]
            );
        }
    }

    #[test]
    fn test_filter_after_sort() {
        let view = listing(vec![
            Entry::file("report.txt", 0, None),
            Entry::file("a.txt", 0, None),
            Entry::file("reset.md", 0, None),
        ]);
        let filtered = view.view(SortKey::Name, SortDirection::Ascending, "re");
        assert_eq!(names(&filtered), vec!["file:report.txt", "file:reset.md"]);

        let filtered = view.view(SortKey::Name, SortDirection::Descending, "RE");
        assert_eq!(names(&filtered), vec!["file:reset.md", "file:report.txt"]);
    }

    #[test]
    fn test_cleared_filter_restores_everything() {
        let view = listing(vec![
            Entry::file("report.txt", 0, None),
            Entry::file("a.txt", 0, None),
        ]);
        assert_eq!(view.view(SortKey::Name, SortDirection::Ascending, "zzz").len(), 0);
        assert_eq!(view.view(SortKey::Name, SortDirection::Ascending, "").len(), 2);
        assert_eq!(view.entries().len(), 2);
    }

    #[test]
    fn test_ordered_keys_use_listing_path() {
        let view = listing(vec![Entry::file("b", 0, None), Entry::file("a", 0, None)]);
        let keys = view.ordered_keys(SortKey::Name, SortDirection::Ascending, "");
        assert_eq!(keys[0].path(), "/docs/a");
        assert_eq!(keys[1].path(), "/docs/b");
    }
}
