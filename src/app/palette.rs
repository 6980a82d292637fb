//! Command palette: the static command catalog and its prefix filter.

use crate::app::list::ListCursor;

/// Mode a palette command switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteTarget {
    Search,
    Add,
}

/// One entry of the command catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub target: PaletteTarget,
}

/// Commands offered by the palette, in display order.
pub const CATALOG: &[CommandEntry] = &[
    CommandEntry {
        name: "/search",
        description: "Search keys by prefix",
        target: PaletteTarget::Search,
    },
    CommandEntry {
        name: "/add",
        description: "Add new key-value pair",
        target: PaletteTarget::Add,
    },
];

/// Typed prefix and the catalog entries matching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteState {
    prefix: String,
    filtered: Vec<CommandEntry>,
    pub list: ListCursor,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            filtered: CATALOG.to_vec(),
            list: ListCursor::default(),
        }
    }
}

impl PaletteState {
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn filtered(&self) -> &[CommandEntry] {
        &self.filtered
    }

    #[must_use]
    pub fn selected(&self) -> Option<&CommandEntry> {
        self.filtered.get(self.list.index)
    }

    pub fn push(&mut self, c: char) {
        self.prefix.push(c);
        self.refilter();
    }

    pub fn backspace(&mut self) {
        if self.prefix.pop().is_some() {
            self.refilter();
        }
    }

    pub fn move_down(&mut self) {
        self.list.move_down(self.filtered.len());
    }

    pub fn move_up(&mut self) {
        self.list.move_up();
    }

    fn refilter(&mut self) {
        self.filtered = filter_catalog(&self.prefix);
        self.list.reset();
        tracing::trace!(prefix = %self.prefix, matches = self.filtered.len(), "palette filtered");
    }
}

/// Catalog entries whose name starts with `prefix`, in catalog order.
#[must_use]
pub fn filter_catalog(prefix: &str) -> Vec<CommandEntry> {
    CATALOG
        .iter()
        .filter(|entry| entry.name.starts_with(prefix))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[CommandEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn filter_preserves_catalog_order() {
        assert_eq!(names(&filter_catalog("")), ["/search", "/add"]);
        assert_eq!(names(&filter_catalog("/")), ["/search", "/add"]);
        assert_eq!(names(&filter_catalog("/s")), ["/search"]);
        assert_eq!(names(&filter_catalog("/a")), ["/add"]);
        assert!(filter_catalog("x").is_empty());
    }

    #[test]
    fn filter_matches_exactly_prefixed_entries() {
        for prefix in ["", "/", "/se", "/search", "/searchx", "/ad", "add", "s"] {
            let expected: Vec<_> = CATALOG
                .iter()
                .filter(|e| e.name.starts_with(prefix))
                .map(|e| e.name)
                .collect();
            assert_eq!(names(&filter_catalog(prefix)), expected, "prefix {prefix:?}");
        }
    }

    #[test]
    fn typing_resets_highlight() {
        let mut palette = PaletteState::default();
        palette.move_down();
        assert_eq!(palette.list.index, 1);
        palette.push('/');
        assert_eq!(palette.list.index, 0);
        palette.push('a');
        assert_eq!(palette.selected().map(|e| e.target), Some(PaletteTarget::Add));
    }

    #[test]
    fn backspace_on_empty_prefix_is_noop() {
        let mut palette = PaletteState::default();
        palette.move_down();
        palette.backspace();
        assert_eq!(palette.prefix(), "");
        assert_eq!(palette.list.index, 1);
    }
}
