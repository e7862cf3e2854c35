use std::collections::HashSet;

/// Text fragments already emitted during a crawl.
///
/// Lives for one crawl run. The first occurrence of a fragment wins, on any page.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` and return true if it had not been seen before
    pub fn insert_new(&mut self, text: &str) -> bool {
        if self.seen.contains(text) {
            return false;
        }
        self.seen.insert(text.to_string());
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
