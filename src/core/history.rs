//! Back/forward navigation history.

use crate::core::error::ExplorerError;
use crate::models::VirtualPath;

/// Browser-style path history with a cursor.
///
/// Never empty, and `cursor < paths.len()` always holds. Pushing while
/// the cursor is behind the end drops the abandoned forward entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationHistory {
    paths: Vec<VirtualPath>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new(start: VirtualPath) -> Self {
        Self {
            paths: vec![start],
            cursor: 0,
        }
    }

    /// Record a fresh navigation.
    ///
    /// No-op when `path` is already the entry under the cursor.
    pub fn push(&mut self, path: VirtualPath) {
        if self.paths[self.cursor] == path {
            return;
        }
        self.paths.truncate(self.cursor + 1);
        self.paths.push(path);
        self.cursor = self.paths.len() - 1;
    }

    pub fn back(&mut self) -> Result<&VirtualPath, ExplorerError> {
        if !self.can_go_back() {
            return Err(ExplorerError::AtBoundary);
        }
        self.cursor -= 1;
        Ok(&self.paths[self.cursor])
    }

    pub fn forward(&mut self) -> Result<&VirtualPath, ExplorerError> {
        if !self.can_go_forward() {
            return Err(ExplorerError::AtBoundary);
        }
        self.cursor += 1;
        Ok(&self.paths[self.cursor])
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.paths.len()
    }

    /// Parent of `path`. Pure: the caller pushes the result if it navigates.
    pub fn up(path: &VirtualPath) -> VirtualPath {
        path.parent()
    }

    pub fn current(&self) -> &VirtualPath {
        &self.paths[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[VirtualPath] {
        &self.paths
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(VirtualPath::root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> VirtualPath {
        VirtualPath::new(s)
    }

    fn history_of(paths: &[&str]) -> NavigationHistory {
        let mut history = NavigationHistory::new(p(paths[0]));
        for path in &paths[1..] {
            history.push(p(path));
        }
        history
    }

    #[test]
    fn test_new_history() {
        let history = NavigationHistory::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), &VirtualPath::root());
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_same_path_is_noop() {
        let mut history = history_of(&["/", "/a"]);
        history.push(p("/a"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_push_after_back_truncates_forward() {
        let mut history = history_of(&["/", "/a", "/b"]);
        assert_eq!(history.cursor(), 2);

        assert_eq!(history.back().unwrap(), &p("/a"));
        assert_eq!(history.cursor(), 1);

        history.push(p("/c"));
        assert_eq!(history.paths(), &[p("/"), p("/a"), p("/c")]);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_back_and_forward_boundaries() {
        let mut history = history_of(&["/", "/a"]);
        assert_eq!(history.forward(), Err(ExplorerError::AtBoundary));

        assert_eq!(history.back().unwrap(), &p("/"));
        assert_eq!(history.back(), Err(ExplorerError::AtBoundary));
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.forward().unwrap(), &p("/a"));
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_button_enablement_tracks_cursor() {
        let mut history = history_of(&["/", "/a", "/b"]);
        let mut moves = 0;
        while history.back().is_ok() {
            moves += 1;
            assert_eq!(history.can_go_back(), history.cursor() != 0);
            assert_eq!(
                history.can_go_forward(),
                history.cursor() != history.len() - 1
            );
        }
        assert_eq!(moves, 2);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut history = NavigationHistory::default();
        let ops = ["/a", "<", "/b", "/c", "<", "<", "<", ">", "/d", ">", "/d", "<"];
        for op in ops {
            match op {
                "<" => {
                    let _ = history.back();
                }
                ">" => {
                    let _ = history.forward();
                }
                path => history.push(p(path)),
            }
            assert!(history.cursor() < history.len());
        }
    }

    #[test]
    fn test_up_is_pure() {
        let history = history_of(&["/", "/a/b"]);
        assert_eq!(NavigationHistory::up(history.current()), p("/a"));
        assert_eq!(NavigationHistory::up(&VirtualPath::root()), p("/"));
        assert_eq!(history.len(), 2);
    }
}
