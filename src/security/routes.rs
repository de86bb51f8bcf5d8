//! Path classification for the security pipeline.
//!
//! Two independent ordered rule lists decide, per request, whether
//! authentication is skipped and whether admin-level checks apply.
//! Matching is first-match-wins; a path matching no rule falls back to the
//! fail-closed default (authentication required, not admin-scoped).
//! Exemptions are ordered before the prefix rules they carve out, e.g. the
//! exact `/admin/login` rule precedes the `/admin` prefix rule.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Prefix(p) => path.starts_with(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No check applies to this path.
    Public,
    /// The check applies to this path.
    Protected,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub pattern: PathPattern,
    pub disposition: Disposition,
}

const fn rule(pattern: PathPattern, disposition: Disposition) -> RouteRule {
    RouteRule {
        pattern,
        disposition,
    }
}

/// Paths that never require a bearer token.
const AUTHENTICATION_RULES: &[RouteRule] = &[
    rule(PathPattern::Exact("/admin/login"), Disposition::Public),
    rule(PathPattern::Exact("/admin/home"), Disposition::Public),
    rule(PathPattern::Exact("/api/v1/admin/login"), Disposition::Public),
    rule(PathPattern::Exact("/health"), Disposition::Public),
    rule(PathPattern::Exact("/docs"), Disposition::Public),
    rule(PathPattern::Prefix("/api-docs"), Disposition::Public),
    rule(
        PathPattern::Prefix("/api/v1/student/verify/"),
        Disposition::Public,
    ),
];

/// Admin-scoped namespaces, with the public-reachable login and landing
/// pages exempted ahead of the prefix rules.
const ADMIN_RULES: &[RouteRule] = &[
    rule(PathPattern::Exact("/admin/login"), Disposition::Public),
    rule(PathPattern::Exact("/admin/home"), Disposition::Public),
    rule(PathPattern::Exact("/api/v1/admin/login"), Disposition::Public),
    rule(PathPattern::Prefix("/api/v1/admin"), Disposition::Protected),
    rule(PathPattern::Prefix("/admin"), Disposition::Protected),
];

/// Allow-list for the password-policy gate, prefix matched.
const PASSWORD_POLICY_EXEMPT: &[&str] = &[
    "/api/v1/admin/login",
    "/api/v1/admin/change-password",
    "/admin/login",
    "/docs",
    "/api-docs",
    "/health",
];

/// The classifier itself: stateless, immutable after startup, evaluated
/// once per request per gate.
#[derive(Debug, Clone, Copy)]
pub struct RouteRules {
    authentication: &'static [RouteRule],
    admin: &'static [RouteRule],
}

impl RouteRules {
    pub const fn standard() -> Self {
        Self {
            authentication: AUTHENTICATION_RULES,
            admin: ADMIN_RULES,
        }
    }

    fn first_match(rules: &[RouteRule], path: &str) -> Option<Disposition> {
        rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| rule.disposition)
    }

    /// Whether the authentication gate skips this path entirely.
    /// Defaults to `false`: unknown paths require authentication.
    pub fn skips_authentication(&self, path: &str) -> bool {
        matches!(
            Self::first_match(self.authentication, path),
            Some(Disposition::Public)
        )
    }

    /// Whether the admin privilege gate applies to this path.
    /// Defaults to `false`: unknown paths are not admin-scoped.
    pub fn is_admin_protected(&self, path: &str) -> bool {
        matches!(
            Self::first_match(self.admin, path),
            Some(Disposition::Protected)
        )
    }

    /// Whether the password-policy gate skips this path.
    pub fn skips_password_policy(&self, path: &str) -> bool {
        PASSWORD_POLICY_EXEMPT
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}

impl Default for RouteRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: RouteRules = RouteRules::standard();

    #[test]
    fn public_paths_skip_authentication() {
        assert!(RULES.skips_authentication("/health"));
        assert!(RULES.skips_authentication("/docs"));
        assert!(RULES.skips_authentication("/api-docs/openapi.json"));
        assert!(RULES.skips_authentication("/admin/login"));
        assert!(RULES.skips_authentication("/api/v1/admin/login"));
        assert!(RULES.skips_authentication("/api/v1/student/verify/MAT-001"));
    }

    #[test]
    fn unknown_paths_require_authentication() {
        assert!(!RULES.skips_authentication("/"));
        assert!(!RULES.skips_authentication("/api/v1/qr/generate"));
        assert!(!RULES.skips_authentication("/api/v1/admin/students"));
        assert!(!RULES.skips_authentication("/healthcheck"));
    }

    #[test]
    fn exact_exemption_wins_over_prefix() {
        // the login exemptions are ordered before the admin prefixes
        assert!(!RULES.is_admin_protected("/admin/login"));
        assert!(!RULES.is_admin_protected("/admin/home"));
        assert!(!RULES.is_admin_protected("/api/v1/admin/login"));
        assert!(RULES.is_admin_protected("/admin/settings"));
        assert!(RULES.is_admin_protected("/api/v1/admin/students"));
        assert!(RULES.is_admin_protected("/api/v1/admin/create"));
    }

    #[test]
    fn non_admin_paths_are_not_admin_protected() {
        assert!(!RULES.is_admin_protected("/health"));
        assert!(!RULES.is_admin_protected("/api/v1/qr/generate"));
        assert!(!RULES.is_admin_protected("/api/v1/student/verify/MAT-001"));
    }

    #[test]
    fn password_policy_allow_list() {
        assert!(RULES.skips_password_policy("/api/v1/admin/login"));
        assert!(RULES.skips_password_policy("/api/v1/admin/change-password"));
        assert!(RULES.skips_password_policy("/admin/login"));
        assert!(RULES.skips_password_policy("/health"));
        assert!(!RULES.skips_password_policy("/api/v1/admin/students"));
        assert!(!RULES.skips_password_policy("/api/v1/qr/generate"));
    }
}
