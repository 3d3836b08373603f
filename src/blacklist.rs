use std::collections::HashSet;

/// Slugs that must never appear in listing results.
const DEFAULT_SLUGS: &[&str] = &[
    "dear-door",
    "pian-pian",
    "sweet-guy",
    "h-mate",
    "perfect-half",
];

/// Read-only slug set, built once at startup and shared by all operations.
#[derive(Debug, Clone)]
pub struct Blacklist {
    slugs: HashSet<String>,
}

impl Blacklist {
    pub fn new(extra: &[String]) -> Self {
        let mut slugs: HashSet<String> =
            DEFAULT_SLUGS.iter().map(|s| s.to_string()).collect();
        for s in extra {
            let s = s.trim();
            if !s.is_empty() {
                slugs.insert(s.to_lowercase());
            }
        }
        Self { slugs }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(&slug.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(&[])
    }
}
