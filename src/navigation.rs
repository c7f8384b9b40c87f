//! Stepping through the images of a directory.

use crate::config::NavigationConfig;
use crate::error::Result;
use crate::services::{FileEnumerator, ImageEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when stepping past either end of the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    /// Continue at the other end.
    Wrap,
    /// Stay at the end.
    #[default]
    Clamp,
}

/// A cursor over an ordered list of images.
///
/// Out-of-range steps never fail: they wrap or clamp according to the cycle mode.
#[derive(Debug, Clone, Default)]
pub struct ImageNavigator {
    entries: Vec<ImageEntry>,
    current: Option<usize>,
    cycle: CycleMode,
}

impl ImageNavigator {
    pub fn new(cycle: CycleMode) -> ImageNavigator {
        ImageNavigator {
            entries: Vec::new(),
            current: None,
            cycle,
        }
    }

    /// A navigator using the configured cycle mode.
    pub fn from_config(config: &NavigationConfig) -> ImageNavigator {
        ImageNavigator::new(config.cycle)
    }

    /// Replaces the list. The cursor moves to `start` if it's in the list, otherwise to the first
    /// entry.
    pub fn set_entries(&mut self, entries: Vec<ImageEntry>, start: Option<&Path>) {
        self.entries = entries;
        self.current = start
            .and_then(|path| self.locate(path))
            .or(if self.entries.is_empty() { None } else { Some(0) });
    }

    /// Lists `dir` through the enumerator and positions the cursor at `start`.
    pub fn load_directory(
        &mut self,
        enumerator: &dyn FileEnumerator,
        dir: &Path,
        start: Option<&Path>,
    ) -> Result<()> {
        let entries = enumerator.enumerate(dir)?;
        self.set_entries(entries, start);
        Ok(())
    }

    /// Index of the entry for `path`.
    pub fn locate(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|entry| entry.path == path)
    }

    pub fn cycle_mode(&self) -> CycleMode {
        self.cycle
    }

    pub fn set_cycle_mode(&mut self, cycle: CycleMode) {
        self.cycle = cycle;
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn is_at_first(&self) -> bool {
        self.current == Some(0)
    }

    pub fn is_at_last(&self) -> bool {
        !self.entries.is_empty() && self.current == Some(self.entries.len() - 1)
    }

    /// Moves the cursor by `delta` entries and returns the new current entry.
    pub fn step(&mut self, delta: isize) -> Option<&ImageEntry> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let current = self.current.unwrap_or(0);
        let target = match self.cycle {
            // i128 holds any usize index plus any isize delta
            CycleMode::Wrap => (current as i128 + delta as i128).rem_euclid(len as i128) as usize,
            CycleMode::Clamp => {
                let target = (current as isize).saturating_add(delta).max(0) as usize;
                target.min(len - 1)
            }
        };
        self.current = Some(target);
        self.current()
    }

    pub fn next(&mut self) -> Option<&ImageEntry> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<&ImageEntry> {
        self.step(-1)
    }

    /// Moves the cursor to `index`, clamped to the list.
    pub fn jump_to(&mut self, index: usize) -> Option<&ImageEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.current = Some(index.min(self.entries.len() - 1));
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    fn entries(names: &[&str]) -> Vec<ImageEntry> {
        names
            .iter()
            .map(|name| ImageEntry::from_path(format!("/photos/{}", name)))
            .collect()
    }

    fn current_name(navigator: &ImageNavigator) -> Option<&str> {
        navigator.current().map(|entry| entry.name.as_str())
    }

    #[test]
    fn clamp_stays_at_the_ends() {
        let mut navigator = ImageNavigator::new(CycleMode::Clamp);
        navigator.set_entries(entries(&["a.jpg", "b.jpg", "c.jpg"]), None);

        assert_eq!(navigator.previous().map(|e| e.name.as_str()), Some("a.jpg"));
        navigator.step(10);
        assert_eq!(current_name(&navigator), Some("c.jpg"));
        assert!(navigator.is_at_last());
        navigator.next();
        assert_eq!(current_name(&navigator), Some("c.jpg"));
    }

    #[test]
    fn wrap_continues_at_the_other_end() {
        let mut navigator = ImageNavigator::new(CycleMode::Wrap);
        navigator.set_entries(entries(&["a.jpg", "b.jpg", "c.jpg"]), None);

        navigator.previous();
        assert_eq!(current_name(&navigator), Some("c.jpg"));
        navigator.next();
        assert_eq!(current_name(&navigator), Some("a.jpg"));
        navigator.step(-7);
        assert_eq!(current_name(&navigator), Some("c.jpg"));
    }

    #[test]
    fn huge_steps_clamp_or_wrap_without_overflow() {
        let mut navigator = ImageNavigator::new(CycleMode::Clamp);
        navigator.set_entries(entries(&["a.jpg", "b.jpg"]), None);
        navigator.jump_to(1);
        navigator.step(isize::MAX);
        assert_eq!(navigator.current_index(), Some(1));
        navigator.step(isize::MIN);
        assert_eq!(navigator.current_index(), Some(0));

        let mut navigator = ImageNavigator::new(CycleMode::Wrap);
        navigator.set_entries(entries(&["a.jpg", "b.jpg", "c.jpg"]), None);
        navigator.jump_to(2);
        let expected = (2 + isize::MAX as i128).rem_euclid(3) as usize;
        navigator.step(isize::MAX);
        assert_eq!(navigator.current_index(), Some(expected));
        let expected = (expected as i128 + isize::MIN as i128).rem_euclid(3) as usize;
        navigator.step(isize::MIN);
        assert_eq!(navigator.current_index(), Some(expected));
    }

    #[test]
    fn cycle_mode_comes_from_config() {
        let config = NavigationConfig {
            cycle: CycleMode::Wrap,
        };
        let mut navigator = ImageNavigator::from_config(&config);
        navigator.set_entries(entries(&["a.jpg", "b.jpg"]), None);
        navigator.previous();
        assert_eq!(current_name(&navigator), Some("b.jpg"));
    }

    #[test]
    fn start_file_is_located() {
        let mut navigator = ImageNavigator::default();
        let start = PathBuf::from("/photos/b.jpg");
        navigator.set_entries(entries(&["a.jpg", "b.jpg", "c.jpg"]), Some(&start));
        assert_eq!(navigator.current_index(), Some(1));

        let missing = PathBuf::from("/elsewhere/z.jpg");
        navigator.set_entries(entries(&["a.jpg"]), Some(&missing));
        assert_eq!(navigator.current_index(), Some(0));
    }

    #[test]
    fn empty_list_has_no_current_entry() {
        let mut navigator = ImageNavigator::new(CycleMode::Wrap);
        navigator.set_entries(Vec::new(), None);
        assert!(navigator.next().is_none());
        assert!(navigator.jump_to(3).is_none());
        assert_eq!(navigator.current_index(), None);
    }

    #[test]
    fn jump_clamps() {
        let mut navigator = ImageNavigator::default();
        navigator.set_entries(entries(&["a.jpg", "b.jpg"]), None);
        navigator.jump_to(9);
        assert_eq!(navigator.current_index(), Some(1));
    }

    struct FixedEnumerator(Vec<ImageEntry>);

    impl FileEnumerator for FixedEnumerator {
        fn enumerate(&self, dir: &Path) -> Result<Vec<ImageEntry>> {
            if dir == Path::new("/photos") {
                Ok(self.0.clone())
            } else {
                Err(Error::Enumerate {
                    dir: dir.to_path_buf(),
                    reason: "not a directory".into(),
                })
            }
        }
    }

    #[test]
    fn load_directory_uses_the_enumerator() {
        let enumerator = FixedEnumerator(entries(&["a.jpg", "b.jpg"]));
        let mut navigator = ImageNavigator::default();

        let start = PathBuf::from("/photos/b.jpg");
        navigator
            .load_directory(&enumerator, Path::new("/photos"), Some(&start))
            .unwrap();
        assert_eq!(current_name(&navigator), Some("b.jpg"));

        let result = navigator.load_directory(&enumerator, Path::new("/nope"), None);
        assert!(matches!(result, Err(Error::Enumerate { .. })));
        // a failed listing leaves the previous one in place
        assert_eq!(navigator.len(), 2);
    }
}
