//! Per-window back stack.
//!
//! Stored as a persistent cons list: each entry points at the one before it.
//! The root entry is the window's first URL and is never popped.

use std::rc::Rc;

#[derive(Debug)]
struct Entry {
    url: String,
    previous: Option<Rc<Entry>>,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct History {
    top: Rc<Entry>,
}

impl History {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            top: Rc::new(Entry {
                url: initial_url.into(),
                previous: None,
                depth: 1,
            }),
        }
    }

    pub fn current(&self) -> &str {
        &self.top.url
    }

    pub fn len(&self) -> usize {
        self.top.depth
    }

    /// Always false; the root entry is never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn can_go_back(&self) -> bool {
        self.top.previous.is_some()
    }

    /// Push `url` unless it is already the current entry.
    pub fn add(&mut self, url: impl Into<String>) {
        let url = url.into();
        if url == self.top.url {
            return;
        }
        let depth = self.top.depth + 1;
        self.top = Rc::new(Entry {
            url,
            previous: Some(Rc::clone(&self.top)),
            depth,
        });
    }

    /// Pop one entry and return the new current URL. At the root this is a
    /// no-op that returns the root URL.
    pub fn go_back(&mut self) -> &str {
        if let Some(previous) = self.top.previous.clone() {
            self.top = previous;
        }
        self.current()
    }

    /// URLs from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(Some(self.top.as_ref()), |e| e.previous.as_deref())
            .map(|e| e.url.as_str())
    }
}
