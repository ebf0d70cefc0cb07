// src/guard.rs — Navigation guard: per-request allow/redirect policy
//
// Evaluated ahead of every page handler. Pure function of the requested
// path and credential presence: no network, no mutation, idempotent.

/// Pages reachable without a credential.
const PUBLIC_PAGES: [&str; 3] = ["/", "/login", "/signup"];

/// Prefixes that are never page navigations: API proxy paths, static
/// assets, and anything with a file extension (favicon.ico, images, ...).
const INTERNAL_PREFIXES: [&str; 4] = ["/api", "/static", "/public", "/assets"];

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectHome,
    RedirectLogin,
}

pub struct NavigationGuard {
    skip_auth: bool,
}

impl NavigationGuard {
    /// `skip_auth` is the development bypass from configuration: every page
    /// is treated as public.
    pub fn new(skip_auth: bool) -> Self {
        Self { skip_auth }
    }

    /// Decide whether the navigation may proceed. Policy, in order:
    ///
    /// 1. Internal/asset paths are always allowed.
    /// 2. Authenticated users are bounced off the auth forms to home.
    /// 3. Unauthenticated users may only see the public pages; everything
    ///    else redirects to login.
    /// 4. Otherwise allow.
    pub fn evaluate(&self, path: &str, authenticated: bool) -> RouteDecision {
        if self.skip_auth {
            return RouteDecision::Allow;
        }

        if is_internal_path(path) {
            return RouteDecision::Allow;
        }

        if authenticated && (path == "/login" || path == "/signup") {
            return RouteDecision::RedirectHome;
        }

        if !PUBLIC_PAGES.contains(&path) && !authenticated {
            return RouteDecision::RedirectLogin;
        }

        RouteDecision::Allow
    }
}

fn is_internal_path(path: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|p| path.starts_with(p)) || path.contains('.')
}
