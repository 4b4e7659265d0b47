//! The application route table.
//!
//! Declarative configuration only: paths, names, metadata, and view
//! bindings. Matching lives in [`resolve`](crate::resolve), access control
//! in [`guard`](crate::guard).
//!
//! `requires_auth` is **not inherited** — the guard evaluates the matched
//! leaf's own metadata — so the flag is set explicitly on the dashboard
//! layout *and* on every child route. Whether children of a protected
//! parent should pick the flag up implicitly is an open product question;
//! until it is answered, explicit flags keep the behavior unambiguous.

use crate::auth::CredentialStore;
use crate::guard::AuthGuard;
use crate::route::Route;
use crate::router::AppRouter;
use crate::views;
use std::sync::Arc;

/// Name of the guard's fallback route.
pub const HOME: &str = "Home";

/// Build the full route table.
pub fn route_table() -> Vec<Route> {
    vec![
        Route::new("/", |_, cx, _| views::home_page(cx)).name(HOME),
        Route::new("/dashboard", |window, cx, _| {
            views::dashboard_layout(window, cx)
        })
        .requires_auth(true)
        .children(vec![
            Arc::new(
                Route::view("", views::overview_page)
                    .name("First")
                    .requires_auth(true),
            ),
            Arc::new(
                Route::new("profile", |_, cx, _| views::profile_page(cx))
                    .name("Profile")
                    .requires_auth(true),
            ),
            Arc::new(
                Route::view("ai", views::ai_page)
                    .name("Ai")
                    .requires_auth(true),
            ),
            Arc::new(
                Route::view("flashai", views::flashai_page)
                    .name("Flashai")
                    .requires_auth(true),
            ),
            Arc::new(
                Route::view("current_affair", views::current_affairs_page)
                    .name("CurrentAffair")
                    .requires_auth(true),
            ),
        ]),
        Route::view("/adashboard", views::admin_page).name("Adashboard"),
        Route::new("/google-auth-finish", |_, cx, _| {
            views::auth_finish_page(cx)
        })
        .name("GoogleAuthFinish"),
    ]
}

/// Register the table and the auth guard on a router.
///
/// The guard's fallback is resolved through the named-route registry, so it
/// always points at whatever path the `Home` route declares.
pub fn install(router: &mut AppRouter, store: Arc<dyn CredentialStore>) {
    for route in route_table() {
        router.add_route(route);
    }

    let fallback = router
        .path_for(HOME)
        .map_or_else(|| "/".to_string(), str::to_string);
    router.add_guard(AuthGuard::new(store, fallback));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = route_table();
        assert_eq!(table.len(), 4);

        let dashboard = &table[1];
        assert_eq!(dashboard.config.path, "/dashboard");
        assert!(dashboard.config.meta.requires_auth);
        assert_eq!(dashboard.get_children().len(), 5);
        // Index child first, so `/dashboard` lands on the overview.
        assert_eq!(dashboard.children[0].config.path, "");
    }

    #[test]
    fn test_every_dashboard_child_is_flagged_explicitly() {
        let table = route_table();
        for child in table[1].get_children() {
            assert!(
                child.config.meta.requires_auth,
                "child '{}' must carry its own requires_auth flag",
                child.config.path
            );
        }
    }

    #[test]
    fn test_open_routes_are_unflagged() {
        let table = route_table();
        assert!(!table[0].config.meta.requires_auth); // Home
        assert!(!table[2].config.meta.requires_auth); // Adashboard
        assert!(!table[3].config.meta.requires_auth); // GoogleAuthFinish
    }

    #[test]
    fn test_names_are_unique() {
        let table = route_table();
        let mut seen = std::collections::HashSet::new();
        fn collect(route: &Route, seen: &mut std::collections::HashSet<String>) {
            if let Some(name) = &route.config.name {
                assert!(seen.insert(name.clone()), "duplicate route name '{name}'");
            }
            for child in route.get_children() {
                collect(child, seen);
            }
        }
        for route in &table {
            collect(route, &mut seen);
        }
        assert!(seen.contains("Home"));
        assert!(seen.contains("Profile"));
        assert!(seen.contains("GoogleAuthFinish"));
    }
}
