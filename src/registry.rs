use crate::extractors::komiku::KomikuConfig;
use crate::extractors::mangastream::MangaStreamConfig;
use crate::extractors::ExtractionConfig;

/// One external content site: immutable after registry construction.
pub struct DomainDescriptor {
    pub name: &'static str,
    pub base_url: &'static str,
    pub is_active: bool,
    pub config: Box<dyn ExtractionConfig + Send + Sync>,
}

/// Ordered, read-only list of supported domains.
///
/// Declaration order is the fallback order: the orchestrator tries domains
/// front to back and takes the first usable result. Built once at startup
/// and shared by reference; never mutated at runtime.
pub struct DomainRegistry {
    domains: Vec<DomainDescriptor>,
}

impl DomainRegistry {
    pub fn new(domains: Vec<DomainDescriptor>) -> Self {
        Self { domains }
    }

    /// Active domains in declaration order.
    pub fn active_domains(&self) -> impl Iterator<Item = &DomainDescriptor> {
        self.domains.iter().filter(|d| d.is_active)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DomainDescriptor> {
        self.domains.iter().find(|d| d.name == name)
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new(vec![
            DomainDescriptor {
                name: "komiku",
                base_url: "https://komiku.id",
                is_active: true,
                config: Box::new(KomikuConfig),
            },
            DomainDescriptor {
                name: "kiryuu",
                base_url: "https://kiryuu.id",
                is_active: true,
                config: Box::new(MangaStreamConfig::kiryuu()),
            },
            DomainDescriptor {
                name: "shinigami",
                base_url: "https://shinigami.to",
                is_active: true,
                config: Box::new(MangaStreamConfig::shinigami()),
            },
            DomainDescriptor {
                name: "sektekomik",
                base_url: "https://sektekomik.my.id",
                is_active: true,
                config: Box::new(MangaStreamConfig::sektekomik()),
            },
            DomainDescriptor {
                name: "komikcast",
                base_url: "https://komikcast.com",
                is_active: true,
                config: Box::new(MangaStreamConfig::komikcast()),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = DomainRegistry::default();
        let names: Vec<&str> = registry.active_domains().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["komiku", "kiryuu", "shinigami", "sektekomik", "komikcast"]
        );
    }

    #[test]
    fn test_inactive_domains_are_skipped() {
        let registry = DomainRegistry::new(vec![
            DomainDescriptor {
                name: "dead",
                base_url: "https://dead.example",
                is_active: false,
                config: Box::new(KomikuConfig),
            },
            DomainDescriptor {
                name: "live",
                base_url: "https://live.example",
                is_active: true,
                config: Box::new(KomikuConfig),
            },
        ]);
        let names: Vec<&str> = registry.active_domains().map(|d| d.name).collect();
        assert_eq!(names, vec!["live"]);
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = DomainRegistry::default();
        assert!(registry.get("kiryuu").is_some());
        assert!(registry.get("unknown").is_none());
    }
}
