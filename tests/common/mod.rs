//! Shared helpers for integration tests.

#![allow(dead_code)]

use gpui::{BorrowAppContext, TestAppContext};
use std::sync::Arc;
use studydeck::{
    init_router, routes, AppRouter, AuthSession, CredentialStore, NavigationResult, Navigator,
};

/// Install the real application table and guard over the given store.
pub fn init_app(cx: &mut TestAppContext, store: Arc<dyn CredentialStore>) {
    cx.update(|cx| {
        AuthSession::init(cx, Arc::clone(&store));
        init_router(cx, |router| routes::install(router, store));
    });
}

/// Push a path through the full pipeline and return the outcome.
pub fn push(cx: &mut TestAppContext, path: &str) -> NavigationResult {
    let path = path.to_string();
    cx.update(|cx| cx.update_global::<AppRouter, _>(|router, cx| router.push(path, cx)))
}

/// Move back through the full pipeline.
pub fn back(cx: &mut TestAppContext) -> Option<NavigationResult> {
    cx.update(|cx| cx.update_global::<AppRouter, _>(|router, cx| router.back(cx)))
}

/// Current full path (query included).
pub fn current_path(cx: &mut TestAppContext) -> String {
    cx.read(Navigator::current_path)
}

/// Path of the route at the bottom of the current match stack.
pub fn leaf_path(cx: &mut TestAppContext) -> Option<String> {
    cx.read(|cx| {
        cx.global::<AppRouter>()
            .match_stack()
            .leaf()
            .map(|entry| entry.route.config.path.clone())
    })
}
