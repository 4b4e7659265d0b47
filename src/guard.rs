//! Navigation guards.
//!
//! Guards run **before** a transition commits and decide whether navigation
//! should continue, be denied, or be redirected elsewhere. All checks are
//! synchronous — GPUI is single-threaded and the credential lookup is a
//! local read, so there is nothing to await.
//!
//! The one guard this application installs is [`AuthGuard`]: it gates routes
//! whose own [`RouteMeta`](crate::RouteMeta) sets `requires_auth`, checking
//! **presence only** of a stored credential token. A present-but-expired
//! token passes; that policy gap belongs to the external token issuer, not
//! to this guard.
//!
//! Guards registered on the router run in priority order (higher first); the
//! first non-[`Continue`](NavigationAction::Continue) verdict wins.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use studydeck::{AuthGuard, MemoryCredentialStore};
//!
//! let store = Arc::new(MemoryCredentialStore::new());
//! let guard = AuthGuard::new(store, "/");
//! ```

use crate::auth::CredentialStore;
use crate::params::encode_component;
use crate::router::NavigationRequest;
use gpui::App;
use std::sync::Arc;

// ============================================================================
// NavigationAction
// ============================================================================

/// Verdict of a navigation check.
///
/// The auth guard only ever produces `Continue` or `Redirect`; `Deny` exists
/// for custom guards that want to block without a fallback target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Block navigation with a reason.
    Deny {
        /// Human-readable reason for blocking.
        reason: String,
    },

    /// Redirect to a different path.
    Redirect {
        /// Path to redirect to (may carry a query string).
        to: String,
        /// Optional human-readable reason.
        reason: Option<String>,
    },
}

impl NavigationAction {
    /// Allow navigation (alias for [`Continue`](Self::Continue)).
    pub fn allow() -> Self {
        Self::Continue
    }

    /// Block navigation with a reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Redirect navigation to a different path.
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    /// Redirect with a human-readable reason.
    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    /// Check if this action allows navigation.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if this action denies navigation.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Check if this action redirects navigation.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// The redirect target, if this is a redirect.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// RouteGuard trait
// ============================================================================

/// Trait for navigation guards.
///
/// Guards receive the resolved [`NavigationRequest`] — including the target
/// leaf's own metadata — and return a [`NavigationAction`]. They must not
/// mutate application state: the same request against the same state yields
/// the same verdict.
pub trait RouteGuard: Send + Sync + 'static {
    /// Check whether navigation should be allowed.
    fn check(&self, cx: &App, request: &NavigationRequest) -> NavigationAction;

    /// Guard name for logging.
    fn name(&self) -> &'static str {
        "RouteGuard"
    }

    /// Priority for execution order. Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

// ============================================================================
// guard_fn helper
// ============================================================================

/// Create a guard from a closure.
///
/// ```no_run
/// use studydeck::{guard_fn, NavigationAction};
///
/// let guard = guard_fn(|_cx, _request| NavigationAction::Continue);
/// ```
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&App, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    FnGuard { f }
}

/// Guard created from a closure via [`guard_fn`].
pub struct FnGuard<F> {
    f: F,
}

impl<F> RouteGuard for FnGuard<F>
where
    F: Fn(&App, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    fn check(&self, cx: &App, request: &NavigationRequest) -> NavigationAction {
        (self.f)(cx, request)
    }
}

// ============================================================================
// AuthGuard
// ============================================================================

/// Authentication guard over the injected [`CredentialStore`].
///
/// Decision table, evaluated once per navigation against the matched leaf's
/// own metadata:
///
/// | `requires_auth` | token | verdict |
/// |-----------------|-------|---------|
/// | unset / false   | any   | continue |
/// | true            | non-empty | continue |
/// | true            | absent / empty | redirect to fallback + `redirect` query |
///
/// The redirect carries the originally requested full path, URL-encoded, so
/// the post-login flow can resume it.
pub struct AuthGuard {
    store: Arc<dyn CredentialStore>,
    fallback_path: String,
}

impl AuthGuard {
    /// Create an auth guard reading from `store`, redirecting denied
    /// navigations to `fallback_path` (the `Home` route's path).
    pub fn new(store: Arc<dyn CredentialStore>, fallback_path: impl Into<String>) -> Self {
        Self {
            store,
            fallback_path: fallback_path.into(),
        }
    }

    /// The configured fallback path.
    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }
}

impl RouteGuard for AuthGuard {
    fn check(&self, _cx: &App, request: &NavigationRequest) -> NavigationAction {
        if !request.meta.requires_auth {
            return NavigationAction::Continue;
        }

        if self.store.is_authenticated() {
            return NavigationAction::Continue;
        }

        let to = format!(
            "{}?redirect={}",
            self.fallback_path,
            encode_component(&request.full_path())
        );
        NavigationAction::redirect_with_reason(to, "Authentication required")
    }

    fn name(&self) -> &'static str {
        "AuthGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::RouteMeta;

    fn protected_request(path: &str) -> NavigationRequest {
        NavigationRequest::new(path).with_meta(RouteMeta::auth_required())
    }

    // --- NavigationAction ---

    #[test]
    fn test_action_constructors() {
        assert!(NavigationAction::allow().is_continue());
        assert!(NavigationAction::deny("nope").is_deny());

        let action = NavigationAction::redirect("/");
        assert!(action.is_redirect());
        assert_eq!(action.redirect_path(), Some("/"));

        match NavigationAction::redirect_with_reason("/", "why") {
            NavigationAction::Redirect { to, reason } => {
                assert_eq!(to, "/");
                assert_eq!(reason.as_deref(), Some("why"));
            }
            _ => panic!("Expected Redirect"),
        }
    }

    #[test]
    fn test_guard_fn_defaults() {
        let guard = guard_fn(|_cx, _req| NavigationAction::Continue);
        assert_eq!(guard.name(), "RouteGuard");
        assert_eq!(guard.priority(), 0);
    }

    // --- AuthGuard ---

    #[gpui::test]
    fn test_open_route_ignores_token_state(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::new()), "/");
        let request = NavigationRequest::new("/adashboard");

        let result = cx.update(|cx| guard.check(cx, &request));
        assert!(result.is_continue());
    }

    #[gpui::test]
    fn test_protected_route_without_token_redirects(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::new()), "/");
        assert_eq!(guard.name(), "AuthGuard");
        assert_eq!(guard.priority(), 100);

        let request = protected_request("/dashboard/profile");
        let result = cx.update(|cx| guard.check(cx, &request));

        assert!(result.is_redirect());
        assert_eq!(
            result.redirect_path(),
            Some("/?redirect=%2Fdashboard%2Fprofile")
        );
    }

    #[gpui::test]
    fn test_protected_route_with_token_continues(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::with_token("abc123")), "/");
        let request = protected_request("/dashboard/profile");

        let result = cx.update(|cx| guard.check(cx, &request));
        assert!(result.is_continue());
    }

    #[gpui::test]
    fn test_empty_token_is_treated_as_absent(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::with_token("")), "/");
        let request = protected_request("/dashboard/profile");

        let result = cx.update(|cx| guard.check(cx, &request));
        assert!(result.is_redirect());
    }

    #[gpui::test]
    fn test_any_non_empty_token_authorizes(cx: &mut gpui::TestAppContext) {
        // Presence-only semantics: the guard performs no validation at all.
        let guard = AuthGuard::new(
            Arc::new(MemoryCredentialStore::with_token("definitely-not-a-jwt")),
            "/",
        );
        let request = protected_request("/dashboard");

        let result = cx.update(|cx| guard.check(cx, &request));
        assert!(result.is_continue());
    }

    #[gpui::test]
    fn test_check_is_idempotent(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::new()), "/");
        let request = protected_request("/dashboard/profile");

        let first = cx.update(|cx| guard.check(cx, &request));
        let second = cx.update(|cx| guard.check(cx, &request));
        assert_eq!(first, second);
    }

    #[gpui::test]
    fn test_redirect_preserves_query_in_full_path(cx: &mut gpui::TestAppContext) {
        let guard = AuthGuard::new(Arc::new(MemoryCredentialStore::new()), "/");
        let request =
            NavigationRequest::new("/dashboard/ai?tab=2").with_meta(RouteMeta::auth_required());

        let result = cx.update(|cx| guard.check(cx, &request));
        assert_eq!(
            result.redirect_path(),
            Some("/?redirect=%2Fdashboard%2Fai%3Ftab%3D2")
        );
    }
}
