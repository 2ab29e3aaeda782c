#![forbid(unsafe_code)]

//! OSC 8 hyperlink registry.
//!
//! Cells store a compact `u32` link id; the registry maps ids back to
//! URLs when a frame is presented. Id 0 means "no link".
//!
//! ```
//! use folio_render::link_registry::LinkRegistry;
//!
//! let mut registry = LinkRegistry::new();
//! let id = registry.register("https://example.com");
//! assert_eq!(registry.get(id), Some("https://example.com"));
//! ```

use std::collections::HashMap;

/// Registry for hyperlink URLs, deduplicated by URL.
#[derive(Debug, Clone)]
pub struct LinkRegistry {
    /// Slot 0 is reserved for "no link".
    urls: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl Default for LinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            urls: vec![String::new()],
            lookup: HashMap::new(),
        }
    }

    /// Register a URL and return its id.
    ///
    /// Registering the same URL twice returns the same id. An empty URL
    /// maps to 0.
    pub fn register(&mut self, url: &str) -> u32 {
        if url.is_empty() {
            return 0;
        }
        if let Some(&id) = self.lookup.get(url) {
            return id;
        }
        let Ok(id) = u32::try_from(self.urls.len()) else {
            return 0;
        };
        self.urls.push(url.to_string());
        self.lookup.insert(url.to_string(), id);
        id
    }

    /// URL for a link id.
    pub fn get(&self, id: u32) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.urls.get(id as usize).map(String::as_str)
    }

    /// Drop every registered link.
    pub fn clear(&mut self) {
        self.urls.truncate(1);
        self.lookup.clear();
    }

    /// Number of registered links.
    #[inline]
    pub fn len(&self) -> usize {
        self.urls.len() - 1
    }

    /// Check if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
