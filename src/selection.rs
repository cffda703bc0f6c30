/*!
 * Per-file inclusion flags between preview and combine
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Which discovered files take part in the next combine pass
///
/// Built fresh from each discovery result with every file included.
/// Iteration always follows discovery order.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    entries: Vec<(PathBuf, bool)>,
    index: HashMap<PathBuf, usize>,
}

impl SelectionState {
    /// Start a selection with every file included
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut state = Self::default();
        for path in files {
            // Duplicate paths keep their first position
            if state.index.contains_key(&path) {
                continue;
            }
            state.index.insert(path.clone(), state.entries.len());
            state.entries.push((path, true));
        }
        state
    }

    /// Set one file's flag; unknown paths are ignored and yield `false`
    pub fn set_included(&mut self, path: &Path, included: bool) -> bool {
        match self.index.get(path) {
            Some(&i) => {
                self.entries[i].1 = included;
                true
            }
            None => false,
        }
    }

    /// Flip one file's flag, returning the new value
    pub fn toggle(&mut self, path: &Path) -> Option<bool> {
        let &i = self.index.get(path)?;
        let flag = &mut self.entries[i].1;
        *flag = !*flag;
        Some(*flag)
    }

    /// Include or exclude everything at once
    pub fn set_all(&mut self, included: bool) {
        for (_, flag) in &mut self.entries {
            *flag = included;
        }
    }

    /// `None` when the path was never discovered
    pub fn is_included(&self, path: &Path) -> Option<bool> {
        self.index.get(path).map(|&i| self.entries[i].1)
    }

    /// Included paths in discovery order
    pub fn included_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|(_, included)| *included)
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn included_count(&self) -> usize {
        self.entries.iter().filter(|(_, included)| *included).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries with their flags, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&Path, bool)> {
        self.entries.iter().map(|(path, included)| (path.as_path(), *included))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_everything_starts_included() {
        let state = SelectionState::new(paths(&["/p/c.py", "/p/a.py", "/p/b.py"]));
        assert_eq!(state.len(), 3);
        assert_eq!(state.included_count(), 3);
        assert_eq!(state.included_paths(), paths(&["/p/c.py", "/p/a.py", "/p/b.py"]));
    }

    #[test]
    fn test_deselect_preserves_order() {
        let mut state = SelectionState::new(paths(&["/p/c.py", "/p/a.py", "/p/b.py"]));
        assert!(state.set_included(Path::new("/p/a.py"), false));
        assert_eq!(state.included_paths(), paths(&["/p/c.py", "/p/b.py"]));
        assert_eq!(state.is_included(Path::new("/p/a.py")), Some(false));

        assert!(state.set_included(Path::new("/p/a.py"), true));
        assert_eq!(state.included_paths(), paths(&["/p/c.py", "/p/a.py", "/p/b.py"]));
    }

    #[test]
    fn test_unknown_path_is_noop() {
        let mut state = SelectionState::new(paths(&["/p/a.py"]));
        assert!(!state.set_included(Path::new("/p/zzz.py"), false));
        assert_eq!(state.toggle(Path::new("/p/zzz.py")), None);
        assert_eq!(state.is_included(Path::new("/p/zzz.py")), None);
        assert_eq!(state.included_paths(), paths(&["/p/a.py"]));
    }

    #[test]
    fn test_toggle_and_set_all() {
        let mut state = SelectionState::new(paths(&["/p/a.py", "/p/b.py"]));
        assert_eq!(state.toggle(Path::new("/p/b.py")), Some(false));
        assert_eq!(state.included_count(), 1);
        assert_eq!(state.toggle(Path::new("/p/b.py")), Some(true));

        state.set_all(false);
        assert!(state.included_paths().is_empty());
        assert!(!state.is_empty());

        state.set_all(true);
        assert_eq!(
            state.iter().collect::<Vec<_>>(),
            vec![(Path::new("/p/a.py"), true), (Path::new("/p/b.py"), true)]
        );
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let state = SelectionState::new(paths(&["/p/a.py", "/p/b.py", "/p/a.py"]));
        assert_eq!(state.len(), 2);
        assert_eq!(state.included_paths(), paths(&["/p/a.py", "/p/b.py"]));
    }
}
