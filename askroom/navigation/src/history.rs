/// A stack of visited locations, as maintained by a browser.
///
/// Entries are paths relative to the router base, including query and fragment if any.
pub trait History {
    /// The current entry.
    fn current(&self) -> &str;

    /// Add a new entry, dropping all entries ahead of the current one.
    fn push(&mut self, path: String);

    /// Replace the current entry.
    fn replace(&mut self, path: String);

    /// Move through the stack. Moving outside the stack does nothing and returns `false`.
    fn go(&mut self, delta: isize) -> bool;

    fn back(&mut self) -> bool {
        self.go(-1)
    }

    fn forward(&mut self) -> bool {
        self.go(1)
    }
}

/// In-process history, not backed by any browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, path: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, path: String) {
        self.entries[self.index] = path;
    }

    fn go(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(index) if index < self.entries.len() => {
                self.index = index;
                true
            }
            _ => false,
        }
    }
}
