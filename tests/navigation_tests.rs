//! End-to-end navigation tests: the real route table, the real guard, a
//! substituted credential store.

mod common;

use common::{back, current_path, init_app, leaf_path, push};
use gpui::TestAppContext;
use std::sync::Arc;
use studydeck::{finish_login, logout, CredentialStore, MemoryCredentialStore, Navigator, QueryParams};

/// No token, protected path: redirect to Home carrying the original path.
#[gpui::test]
fn test_denied_navigation_redirects_home(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    let result = push(cx, "/dashboard/profile");

    assert!(result.is_success(), "redirect target itself must commit");
    assert_eq!(current_path(cx), "/?redirect=%2Fdashboard%2Fprofile");
    assert_eq!(
        leaf_path(cx).as_deref(),
        Some("/"),
        "denied navigation must land on the Home route"
    );
}

/// The `redirect` parameter round-trips to exactly the original path.
#[gpui::test]
fn test_redirect_param_round_trips(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    push(cx, "/dashboard/current_affair");

    let query = cx
        .read(Navigator::current_query)
        .expect("denied navigation carries a query");
    let decoded = QueryParams::from_query_string(&query);
    assert_eq!(
        decoded.get("redirect").map(String::as_str),
        Some("/dashboard/current_affair")
    );
}

/// Token present: protected navigation proceeds to the target view.
#[gpui::test]
fn test_token_allows_protected_navigation(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::with_token("abc123")));

    let result = push(cx, "/dashboard/profile");

    assert!(result.is_success());
    assert_eq!(current_path(cx), "/dashboard/profile");
    assert_eq!(leaf_path(cx).as_deref(), Some("profile"));
}

/// Home has no auth flag: allowed regardless of token state.
#[gpui::test]
fn test_home_is_always_allowed(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));
    assert!(push(cx, "/").is_success());
    assert_eq!(current_path(cx), "/");
}

/// Top-level unflagged route: allowed even with no token.
#[gpui::test]
fn test_adashboard_is_open(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    let result = push(cx, "/adashboard");

    assert!(result.is_success());
    assert_eq!(current_path(cx), "/adashboard");
}

/// An empty stored string is as good as no token at all.
#[gpui::test]
fn test_empty_token_is_denied(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::with_token("")));

    push(cx, "/dashboard/profile");
    assert_eq!(current_path(cx), "/?redirect=%2Fdashboard%2Fprofile");
}

/// Bare `/dashboard` renders the index child once authorized.
#[gpui::test]
fn test_dashboard_lands_on_index_child(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::with_token("abc123")));

    push(cx, "/dashboard");
    assert_eq!(leaf_path(cx).as_deref(), Some(""));
}

/// Same request, same state, same decision — twice in a row.
#[gpui::test]
fn test_denial_is_idempotent(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    push(cx, "/dashboard/profile");
    let first = current_path(cx);

    push(cx, "/dashboard/profile");
    assert_eq!(current_path(cx), first);
}

/// History movements re-run the guard: a back() into a protected route after
/// logout is denied.
#[gpui::test]
fn test_back_reruns_guard(cx: &mut TestAppContext) {
    let store = Arc::new(MemoryCredentialStore::with_token("abc123"));
    init_app(cx, store.clone());

    assert!(push(cx, "/dashboard/profile").is_success());
    assert!(push(cx, "/").is_success());

    cx.update(|cx| logout(cx));

    let result = back(cx).expect("history has a back entry");
    assert!(result.is_success());
    assert_eq!(current_path(cx), "/?redirect=%2Fdashboard%2Fprofile");
}

/// Completing a login resumes the originally denied target.
#[gpui::test]
fn test_finish_login_resumes_denied_target(cx: &mut TestAppContext) {
    let store = Arc::new(MemoryCredentialStore::new());
    init_app(cx, store.clone());

    push(cx, "/dashboard/profile");
    assert_eq!(current_path(cx), "/?redirect=%2Fdashboard%2Fprofile");

    cx.update(|cx| finish_login(cx, "fresh-jwt"));

    assert_eq!(store.token().as_deref(), Some("fresh-jwt"));
    assert_eq!(current_path(cx), "/dashboard/profile");
    assert_eq!(leaf_path(cx).as_deref(), Some("profile"));
}

/// Without a pending redirect, login completion falls back to the dashboard.
#[gpui::test]
fn test_finish_login_defaults_to_dashboard(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    push(cx, "/google-auth-finish");
    cx.update(|cx| finish_login(cx, "fresh-jwt"));

    assert_eq!(current_path(cx), "/dashboard");
    assert_eq!(leaf_path(cx).as_deref(), Some(""));
}

/// Unknown paths commit and report NotFound; the guard stays out of the way.
#[gpui::test]
fn test_unknown_path_is_not_found(cx: &mut TestAppContext) {
    init_app(cx, Arc::new(MemoryCredentialStore::new()));

    let result = push(cx, "/nope");

    assert!(result.is_not_found());
    assert_eq!(current_path(cx), "/nope");
    assert_eq!(leaf_path(cx), None);
}

/// Logging out mid-session: the next protected navigation is denied.
#[gpui::test]
fn test_logout_revokes_access(cx: &mut TestAppContext) {
    let store = Arc::new(MemoryCredentialStore::with_token("abc123"));
    init_app(cx, store);

    assert!(push(cx, "/dashboard/ai").is_success());
    assert_eq!(current_path(cx), "/dashboard/ai");

    cx.update(|cx| logout(cx));

    push(cx, "/dashboard/flashai");
    assert_eq!(current_path(cx), "/?redirect=%2Fdashboard%2Fflashai");
}
