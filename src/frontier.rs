use crate::filter::UrlFilter;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Discovered-but-unfetched URLs plus the set of URLs already dequeued
#[derive(Debug)]
pub struct Frontier {
    filter: Arc<UrlFilter>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new(filter: Arc<UrlFilter>) -> Self {
        Self {
            filter,
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Queue every URL that is in scope, unvisited and not already pending.
    /// Returns how many were added.
    pub fn offer<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for url in urls {
            let url = url.into();
            if !self.filter.is_in_scope(&url)
                || self.visited.contains(&url)
                || self.queued.contains(&url)
            {
                continue;
            }
            ::log::trace!("Queuing {}", url);
            self.queued.insert(url.clone());
            self.queue.push_back(url);
            added += 1;
        }
        added
    }

    /// Dequeue the next URL, marking it visited in the same step
    pub fn take_next(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        self.visited.insert(url.clone());
        Some(url)
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
