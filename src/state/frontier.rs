use std::collections::HashSet;

/// Work set of the domain spider
///
/// Holds the URLs already fetched and the URLs waiting to be fetched. A URL
/// is never in both sets, and the two sets together never grow past the page
/// budget through [`Frontier::try_enqueue`].
#[derive(Debug, Clone)]
pub struct Frontier {
    visited: HashSet<String>,
    to_visit: HashSet<String>,
    max_urls: usize,
}

impl Frontier {
    /// Creates a frontier seeded with one URL
    pub fn new(seed: impl Into<String>, max_urls: usize) -> Self {
        let mut to_visit = HashSet::new();
        to_visit.insert(seed.into());
        Self {
            visited: HashSet::new(),
            to_visit,
            max_urls,
        }
    }

    /// Removes and returns an arbitrary pending URL
    pub fn pop(&mut self) -> Option<String> {
        let next = self.to_visit.iter().next().cloned()?;
        self.to_visit.remove(&next);
        Some(next)
    }

    /// Marks a URL as visited
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not visited before
    /// * `false` - The URL had already been visited
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.to_visit.remove(url);
        self.visited.insert(url.to_string())
    }

    /// Queues a URL if it is new and the budget leaves room for it
    ///
    /// # Returns
    ///
    /// * `true` - The URL was added to the pending set
    /// * `false` - Already visited, already pending, or the budget is full
    pub fn try_enqueue(&mut self, url: String) -> bool {
        if self.is_visited(&url) || self.to_visit.contains(&url) {
            return false;
        }
        if self.visited.len() + self.to_visit.len() >= self.max_urls {
            return false;
        }
        self.to_visit.insert(url)
    }

    /// Returns true while there is pending work within the budget
    pub fn has_pending(&self) -> bool {
        !self.to_visit.is_empty() && self.visited.len() < self.max_urls
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_len(&self) -> usize {
        self.to_visit.len()
    }
}
