//! Code-to-symbol dispatch table.
//!
//! Classification codes are opaque strings; the registry decides which
//! built-in symbol renderer, if any, an object's code maps to. The
//! built-in table mirrors the classifier currently in the field, and a
//! deployment can override it from configuration.

use serde::Deserialize;

/// Predicate over classification codes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeMatcher {
    /// Matches one code exactly.
    Exact(String),
    /// Matches any code in the list.
    AnyOf(Vec<String>),
    /// Matches numeric codes within an inclusive range. Codes that do
    /// not parse as integers never match.
    IdRange { start: i32, end: i32 },
}

impl CodeMatcher {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            CodeMatcher::Exact(want) => want == code,
            CodeMatcher::AnyOf(set) => set.iter().any(|want| want == code),
            CodeMatcher::IdRange { start, end } => code
                .parse::<i32>()
                .map(|n| *start <= n && n <= *end)
                .unwrap_or(false),
        }
    }
}

/// The symbol renderers objects can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    PatrolArea,
    FlightRoute,
    AttackArrow,
    PlannedArrow,
    CompletedArrow,
    Pit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub matcher: CodeMatcher,
    pub symbol: SymbolKind,
}

/// Ordered dispatch table; the first matching entry wins.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    entries: Vec<RegistryEntry>,
}

impl SymbolRegistry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        SymbolRegistry { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<SymbolKind> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(code))
            .map(|entry| entry.symbol)
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        let entry = |matcher, symbol| RegistryEntry { matcher, symbol };
        SymbolRegistry::new(vec![
            entry(CodeMatcher::Exact("47".into()), SymbolKind::PatrolArea),
            entry(
                CodeMatcher::IdRange { start: 184, end: 193 },
                SymbolKind::PatrolArea,
            ),
            entry(CodeMatcher::Exact("74".into()), SymbolKind::FlightRoute),
            entry(
                CodeMatcher::IdRange { start: 174, end: 183 },
                SymbolKind::FlightRoute,
            ),
            entry(CodeMatcher::Exact("407".into()), SymbolKind::AttackArrow),
            entry(CodeMatcher::Exact("408".into()), SymbolKind::PlannedArrow),
            entry(CodeMatcher::Exact("366".into()), SymbolKind::CompletedArrow),
            entry(CodeMatcher::Exact("432".into()), SymbolKind::Pit),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_dispatch() {
        let registry = SymbolRegistry::default();
        assert_eq!(registry.lookup("47"), Some(SymbolKind::PatrolArea));
        assert_eq!(registry.lookup("184"), Some(SymbolKind::PatrolArea));
        assert_eq!(registry.lookup("193"), Some(SymbolKind::PatrolArea));
        assert_eq!(registry.lookup("74"), Some(SymbolKind::FlightRoute));
        assert_eq!(registry.lookup("174"), Some(SymbolKind::FlightRoute));
        assert_eq!(registry.lookup("407"), Some(SymbolKind::AttackArrow));
        assert_eq!(registry.lookup("408"), Some(SymbolKind::PlannedArrow));
        assert_eq!(registry.lookup("366"), Some(SymbolKind::CompletedArrow));
        assert_eq!(registry.lookup("432"), Some(SymbolKind::Pit));
        assert_eq!(registry.lookup("194"), None);
        assert_eq!(registry.lookup(""), None);
    }

    #[test]
    fn test_id_range_rejects_non_numeric_codes() {
        let matcher = CodeMatcher::IdRange { start: 0, end: 999 };
        assert!(matcher.matches("47"));
        assert!(!matcher.matches("47a"));
        assert!(!matcher.matches("4.7"));
    }

    #[test]
    fn test_first_match_wins() {
        let registry = SymbolRegistry::new(vec![
            RegistryEntry {
                matcher: CodeMatcher::IdRange { start: 100, end: 200 },
                symbol: SymbolKind::Pit,
            },
            RegistryEntry {
                matcher: CodeMatcher::Exact("150".into()),
                symbol: SymbolKind::AttackArrow,
            },
        ]);
        assert_eq!(registry.lookup("150"), Some(SymbolKind::Pit));
    }

    #[test]
    fn test_registry_deserializes_from_yaml() {
        let yaml = r#"
- matcher:
    exact: "47"
  symbol: patrol_area
- matcher:
    id_range:
      start: 174
      end: 183
  symbol: flight_route
- matcher:
    any_of: ["407", "408"]
  symbol: attack_arrow
"#;
        let entries: Vec<RegistryEntry> = serde_yaml::from_str(yaml).unwrap();
        let registry = SymbolRegistry::new(entries);
        assert_eq!(registry.lookup("47"), Some(SymbolKind::PatrolArea));
        assert_eq!(registry.lookup("180"), Some(SymbolKind::FlightRoute));
        assert_eq!(registry.lookup("408"), Some(SymbolKind::AttackArrow));
    }
}
