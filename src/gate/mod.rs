//! Route classification for the maintenance gate.
//!
//! The bypass rules live in an ordered table evaluated top-down rather than
//! inline branching, so each rule is independently testable and deployments
//! can append their own prefixes. Paths that match no rule are gated.

/// Outcome of classifying a request path against the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Exempt from maintenance enforcement.
    Bypass,
    /// Subject to the maintenance flag.
    Gate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    Prefix(String),
}

#[derive(Debug, Clone)]
struct RouteRule {
    pattern: Pattern,
    class: RouteClass,
}

impl RouteRule {
    fn matches(&self, path: &str) -> bool {
        match &self.pattern {
            Pattern::Exact(p) => path == p,
            Pattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// Ordered classification table. Construct once at startup, consult per
/// request.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

/// The maintenance page itself must stay reachable or its redirect target
/// would loop.
pub const MAINTENANCE_PATH: &str = "/maintenance";

impl RouteTable {
    /// Built-in bypass rules:
    /// - the maintenance page (exact), to avoid a redirect loop
    /// - the admin surface in both casings, so the off-switch stays reachable
    /// - the API namespace, which the admin surface and the gate itself use
    /// - framework asset paths and the favicon, so the maintenance page can
    ///   render its own assets
    /// - the health probe
    pub fn new() -> Self {
        Self {
            rules: vec![
                RouteRule { pattern: Pattern::Exact(MAINTENANCE_PATH.to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Prefix("/Admin".to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Prefix("/admin".to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Prefix("/api".to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Prefix("/_next".to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Prefix("/favicon.ico".to_string()), class: RouteClass::Bypass },
                RouteRule { pattern: Pattern::Exact("/health".to_string()), class: RouteClass::Bypass },
            ],
        }
    }

    /// Append deployment-specific bypass prefixes after the built-ins.
    pub fn with_extra_bypass_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            self.rules.push(RouteRule {
                pattern: Pattern::Prefix(prefix.into()),
                class: RouteClass::Bypass,
            });
        }
        self
    }

    /// Classify a request path. First matching rule wins; no match gates.
    pub fn classify(&self, path: &str) -> RouteClass {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.class)
            .unwrap_or(RouteClass::Gate)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Developer override: lets a developer preview the live site locally while
/// global maintenance is on. Requires both a loopback host and an explicit
/// `dev=true` query parameter.
pub fn dev_override(host: Option<&str>, query: Option<&str>) -> bool {
    let loopback = match host {
        Some(host) => {
            // Host headers may carry a port
            let hostname = host.split(':').next().unwrap_or(host);
            hostname == "localhost" || hostname == "127.0.0.1"
        }
        None => false,
    };

    loopback && query.is_some_and(has_dev_flag)
}

fn has_dev_flag(query: &str) -> bool {
    query.split('&').any(|pair| pair == "dev=true")
}
