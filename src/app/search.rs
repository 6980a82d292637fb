//! Search sub-state: the query box, the last result page and scan bookkeeping.

use crate::app::list::ListCursor;
use crate::app::modes::DeleteGesture;
use crate::domain::KvEntry;

/// State of the search view.
///
/// `cursor` counts characters of `query`. `pending` holds the id of the most
/// recently issued scan; results carrying any other id are stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    cursor: usize,
    pub results: Vec<KvEntry>,
    pub list: ListCursor,
    pub gesture: DeleteGesture,
    pending: Option<u64>,
}

impl SearchState {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn pending_request(&self) -> Option<u64> {
        self.pending
    }

    #[must_use]
    pub fn selected(&self) -> Option<&KvEntry> {
        self.results.get(self.list.index)
    }

    fn byte_offset(&self, col: usize) -> usize {
        self.query
            .char_indices()
            .nth(col)
            .map_or(self.query.len(), |(idx, _)| idx)
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.query.insert(offset, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns whether the query changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.query.remove(offset);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_down(&mut self) {
        self.list.move_down(self.results.len());
    }

    pub fn move_up(&mut self) {
        self.list.move_up();
    }

    pub(crate) fn begin_scan(&mut self, request_id: u64) {
        self.pending = Some(request_id);
    }

    /// Installs a scan result if it answers the latest request.
    ///
    /// Returns `false` and leaves the state untouched for stale results.
    pub fn accept_results(&mut self, request_id: u64, entries: Vec<KvEntry>) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        self.results = entries;
        self.list.reset();
        true
    }

    /// Clears the in-flight marker for a failed scan. Returns `false` if stale.
    pub fn fail_scan(&mut self, request_id: u64) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Drops `key` from the result list, keeping the highlight in range.
    pub fn remove_key(&mut self, key: &[u8]) {
        self.results.retain(|entry| entry.key != key);
        self.list.clamp(self.results.len());
    }

    /// Refreshes the cached value of `key` if it is listed.
    pub fn update_value(&mut self, key: &[u8], value: &str) {
        if let Some(entry) = self.results.iter_mut().find(|e| e.key == key) {
            entry.value = value.as_bytes().to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(keys: &[&str]) -> Vec<KvEntry> {
        keys.iter().map(|k| KvEntry::new(*k, format!("v-{k}"))).collect()
    }

    #[test]
    fn editing_query_at_cursor() {
        let mut search = SearchState::default();
        for c in "usr".chars() {
            search.insert_char(c);
        }
        search.move_left();
        search.insert_char('e');
        assert_eq!(search.query(), "user");
        assert_eq!(search.cursor(), 3);

        search.move_right();
        search.move_right();
        assert_eq!(search.cursor(), 4);
        assert!(search.backspace());
        assert_eq!(search.query(), "use");

        search.move_left();
        search.move_left();
        search.move_left();
        search.move_left();
        assert_eq!(search.cursor(), 0);
        assert!(!search.backspace());
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut search = SearchState::default();
        search.begin_scan(1);
        search.begin_scan(2);
        assert!(!search.accept_results(1, entries(&["old"])));
        assert!(search.results.is_empty());
        assert!(search.is_searching());

        assert!(search.accept_results(2, entries(&["a", "b"])));
        assert_eq!(search.results.len(), 2);
        assert!(!search.is_searching());
        assert!(!search.accept_results(2, entries(&["again"])));
    }

    #[test]
    fn new_results_reset_highlight() {
        let mut search = SearchState::default();
        search.begin_scan(1);
        search.accept_results(1, entries(&["a", "b", "c"]));
        search.move_down();
        search.move_down();
        assert_eq!(search.selected().map(|e| e.key.as_slice()), Some(b"c".as_slice()));

        search.begin_scan(2);
        search.accept_results(2, entries(&["x", "y"]));
        assert_eq!(search.list, ListCursor::default());
    }

    #[test]
    fn remove_key_clamps_highlight() {
        let mut search = SearchState::default();
        search.begin_scan(1);
        search.accept_results(1, entries(&["a", "b"]));
        search.move_down();
        search.remove_key(b"b");
        assert_eq!(search.selected().map(|e| e.key.as_slice()), Some(b"a".as_slice()));
    }
}
