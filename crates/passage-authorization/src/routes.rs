//! Route protection table

use passage_core::{RoutePath, RouteRule};

/// How a route is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteProtection {
    /// Anyone may navigate here.
    Public,
    /// The route gate must authorize navigation.
    Protected {
        /// Wallet-only access requires the target chain
        require_correct_chain: bool,
    },
}

/// Path-prefix table; the longest matching prefix wins, unmatched paths are
/// public.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(String, RouteProtection)>,
}

impl RouteTable {
    /// Empty table: every route is public.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configured rules. Rules without an explicit chain
    /// requirement use `default_require_chain`.
    pub fn from_rules(rules: &[RouteRule], default_require_chain: bool) -> Self {
        rules.iter().fold(Self::new(), |table, rule| {
            let protection = if rule.protected {
                RouteProtection::Protected {
                    require_correct_chain: rule
                        .require_correct_chain
                        .unwrap_or(default_require_chain),
                }
            } else {
                RouteProtection::Public
            };
            table.with_route(rule.prefix.clone(), protection)
        })
    }

    /// Add or replace an entry.
    pub fn with_route(mut self, prefix: impl Into<String>, protection: RouteProtection) -> Self {
        let prefix = prefix.into();
        self.entries.retain(|(existing, _)| *existing != prefix);
        self.entries.push((prefix, protection));
        self
    }

    /// Protection for `path`.
    pub fn protection_for(&self, path: &RoutePath) -> RouteProtection {
        self.entries
            .iter()
            .filter(|(prefix, _)| path.starts_with_segment(prefix))
            .max_by_key(|(prefix, _)| prefix.trim_end_matches('/').len())
            .map(|(_, protection)| *protection)
            .unwrap_or(RouteProtection::Public)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
