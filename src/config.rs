use std::collections::HashMap;

/// Top-level `key = value` pairs. Later assignments replace earlier ones.
pub type AssignmentMap = HashMap<String, String>;

/// `domain { label { ... } }` entries, keyed by the label's literal text.
pub type DomainBlockMap = HashMap<String, AssignmentMap>;

/// Structure-agnostic result of parsing one configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedConfig {
    assignments: AssignmentMap,
    domains: DomainBlockMap,
}

impl ParsedConfig {
    pub fn new(assignments: AssignmentMap, domains: DomainBlockMap) -> ParsedConfig {
        ParsedConfig {
            assignments,
            domains,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignments.get(key).map(String::as_str)
    }

    pub fn domain(&self, name: &str) -> Option<&AssignmentMap> {
        self.domains.get(name)
    }

    /// Block labels in unspecified order.
    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn domains(&self) -> &DomainBlockMap {
        &self.domains
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.domains.is_empty()
    }

    pub fn into_parts(self) -> (AssignmentMap, DomainBlockMap) {
        (self.assignments, self.domains)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> AssignmentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_accessors() {
        let mut domains = DomainBlockMap::new();
        domains.insert(String::from("a.com"), map(&[("selector", "s1")]));
        let cfg = ParsedConfig::new(map(&[("enabled", "true")]), domains);

        assert!(!cfg.is_empty());
        assert_eq!(cfg.get("enabled"), Some("true"));
        assert_eq!(cfg.get("missing"), None);
        assert_eq!(cfg.domain("a.com"), Some(&map(&[("selector", "s1")])));
        assert_eq!(cfg.domain_names().collect::<Vec<_>>(), vec!["a.com"]);
    }

    #[test]
    fn test_into_parts_hands_over_both_maps() {
        let mut domains = DomainBlockMap::new();
        domains.insert(String::from("*"), map(&[("path", "/p")]));
        let cfg = ParsedConfig::new(map(&[("selector", "s1")]), domains.clone());

        let (assignments, blocks) = cfg.into_parts();
        assert_eq!(assignments, map(&[("selector", "s1")]));
        assert_eq!(blocks, domains);
    }

    #[test]
    fn test_default_is_empty() {
        let (assignments, blocks) = ParsedConfig::default().into_parts();
        assert!(assignments.is_empty());
        assert!(blocks.is_empty());
    }
}
