//! Global router and the navigation pipeline.
//!
//! Three key pieces:
//!
//! - [`AppRouter`] — the central routing object stored as a GPUI `Global`.
//!   It owns the [`RouterState`], the named-route registry, the registered
//!   guards, an LRU resolution cache, and the pre-resolved [`MatchStack`]
//!   consumed by outlets.
//! - [`Navigator`] — static convenience API (`Navigator::push`,
//!   `Navigator::pop`, …) that reads/writes the global through `cx`.
//! - [`init_router`] — bootstrap hook registering the global before any
//!   navigation.
//!
//! # Pipeline
//!
//! Every navigation — push, replace, back, forward, or startup — runs the
//! same synchronous pipeline before anything renders:
//!
//! 1. **Resolve** the target's route chain (query split off first).
//! 2. **Guards** in priority order against the resolved leaf's own metadata;
//!    first non-continue verdict wins. Redirects re-enter the pipeline with
//!    a bounded depth.
//! 3. **Commit** the history movement and publish the match stack.
//!
//! A second navigation cannot overlap the first: the pipeline completes
//! before control returns to the event loop.

use crate::error::{NavigationError, NavigationResult};
use crate::guard::{NavigationAction, RouteGuard};
use crate::resolve::{normalize_path, resolve_route_stack, split_query, trim_slashes, MatchStack};
use crate::route::{Route, RouteMeta};
use crate::state::RouterState;
use crate::RouteParams;
use gpui::{App, BorrowAppContext, Global};
use lru::LruCache;
use std::borrow::BorrowMut;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Maximum redirect depth before a navigation is declared a loop.
const MAX_REDIRECT_DEPTH: usize = 5;

/// Capacity of the per-path resolution cache.
const RESOLVE_CACHE_CAPACITY: usize = 64;

// ============================================================================
// NavigationRequest
// ============================================================================

/// A single navigation attempt, as seen by guards.
///
/// Transient: built per attempt after resolution, dropped once the pipeline
/// decides. Carries the resolved leaf's own metadata — guards never walk the
/// route tree themselves.
///
/// # Example
///
/// ```
/// use studydeck::{NavigationRequest, RouteMeta};
///
/// let request = NavigationRequest::new("/dashboard/profile?tab=2")
///     .with_meta(RouteMeta::auth_required());
/// assert_eq!(request.path, "/dashboard/profile");
/// assert_eq!(request.full_path(), "/dashboard/profile?tab=2");
/// assert!(request.meta.requires_auth);
/// ```
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// Path navigated from, if any.
    pub from: Option<String>,
    /// Normalized target path, query stripped.
    pub path: String,
    /// Raw query string of the target, if any.
    pub query: Option<String>,
    /// Metadata of the resolved target leaf (default when nothing matched).
    pub meta: RouteMeta,
    /// Params accumulated along the resolved chain.
    pub params: RouteParams,
}

impl NavigationRequest {
    /// Build a request from a full target path (query allowed).
    pub fn new(target: impl AsRef<str>) -> Self {
        let (path, query) = split_query(target.as_ref());
        Self {
            from: None,
            path: normalize_path(path).into_owned(),
            query: query.map(str::to_string),
            meta: RouteMeta::default(),
            params: RouteParams::new(),
        }
    }

    /// Set the source path.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the resolved target metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the resolved params.
    #[must_use]
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// The full intended path: normalized path plus query, exactly what a
    /// denied navigation is expected to resume later.
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

// ============================================================================
// Named routes
// ============================================================================

/// Registry mapping unique route names to their full paths.
///
/// Uniqueness is the table-wide invariant: a second registration under an
/// existing name is rejected.
#[derive(Debug, Default)]
pub struct NamedRouteRegistry {
    paths: HashMap<String, String>,
}

impl NamedRouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` → `path`. Returns `false` (and keeps the first
    /// registration) when the name is already taken.
    pub fn register(&mut self, name: String, path: String) -> bool {
        match self.paths.entry(name) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                log::error!(
                    "duplicate route name '{}' (kept '{}', rejected '{}')",
                    entry.key(),
                    entry.get(),
                    path
                );
                false
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(path);
                true
            }
        }
    }

    /// Full path registered under `name`.
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when no names are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

// ============================================================================
// AppRouter
// ============================================================================

/// Internal enum for the kind of history movement to perform after checks.
#[derive(Debug, Clone, Copy)]
enum NavigateOp {
    Push,
    Replace,
    Back,
    Forward,
}

/// Global router state accessible from any component.
pub struct AppRouter {
    state: RouterState,
    /// Pre-resolved route chain for the current path, rebuilt per
    /// navigation and consumed by outlets during render.
    match_stack: MatchStack,
    guards: Vec<Box<dyn RouteGuard>>,
    named: NamedRouteRegistry,
    /// Per-path resolution cache, cleared whenever the table changes.
    resolve_cache: LruCache<String, MatchStack>,
}

impl Global for AppRouter {}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRouter {
    /// Create a router with empty state and no registered routes.
    pub fn new() -> Self {
        let capacity =
            NonZeroUsize::new(RESOLVE_CACHE_CAPACITY).expect("cache capacity is non-zero");
        Self {
            state: RouterState::new(),
            match_stack: MatchStack::new(),
            guards: Vec::new(),
            named: NamedRouteRegistry::new(),
            resolve_cache: LruCache::new(capacity),
        }
    }

    /// Register a top-level route (and the names of its whole subtree), then
    /// re-resolve the current path.
    pub fn add_route(&mut self, route: Route) {
        self.register_names(&route, "");
        log::info!("registered route '{}'", route.config.path);

        self.state.add_route(route);
        self.resolve_cache.clear();
        self.re_resolve();
    }

    /// Walk a route subtree, registering every named entry under its full
    /// accumulated path.
    fn register_names(&mut self, route: &Route, prefix: &str) {
        let full = join_paths(prefix, &route.config.path);
        if let Some(name) = &route.config.name {
            self.named.register(name.clone(), full.clone());
        }
        for child in route.get_children() {
            self.register_names(child, &full);
        }
    }

    /// Register a navigation guard. Guards run on every navigation in
    /// priority order (higher first).
    pub fn add_guard<G: RouteGuard>(&mut self, guard: G) {
        log::info!("registered guard '{}'", guard.name());
        self.guards.push(Box::new(guard));
    }

    /// Full path registered for a route name.
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.named.path_for(name)
    }

    /// The pre-resolved match stack for the current path. O(1) for outlets.
    pub fn match_stack(&self) -> &MatchStack {
        &self.match_stack
    }

    /// The current full path (query included).
    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    /// The current raw query string, if any.
    pub fn current_query(&self) -> Option<&str> {
        split_query(self.state.current_path()).1
    }

    /// Whether history can move back.
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Whether history can move forward.
    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// Immutable access to the underlying state.
    pub fn state(&self) -> &RouterState {
        &self.state
    }

    // ========================================================================
    // Navigation pipeline
    // ========================================================================

    /// Navigate to a path, running the full guard pipeline.
    pub fn push(&mut self, path: String, cx: &App) -> NavigationResult {
        self.navigate_with_pipeline(path, cx, NavigateOp::Push, 0)
    }

    /// Replace the current path, running the full guard pipeline.
    pub fn replace(&mut self, path: String, cx: &App) -> NavigationResult {
        self.navigate_with_pipeline(path, cx, NavigateOp::Replace, 0)
    }

    /// Go back in history, re-checking guards on the target.
    pub fn back(&mut self, cx: &App) -> Option<NavigationResult> {
        let target = self.state.peek_back_path()?.to_string();
        Some(self.navigate_with_pipeline(target, cx, NavigateOp::Back, 0))
    }

    /// Go forward in history, re-checking guards on the target.
    pub fn forward(&mut self, cx: &App) -> Option<NavigationResult> {
        let target = self.state.peek_forward_path()?.to_string();
        Some(self.navigate_with_pipeline(target, cx, NavigateOp::Forward, 0))
    }

    fn navigate_with_pipeline(
        &mut self,
        target: String,
        cx: &App,
        op: NavigateOp,
        redirect_depth: usize,
    ) -> NavigationResult {
        if redirect_depth >= MAX_REDIRECT_DEPTH {
            let err = NavigationError::RedirectLoop {
                path: target.clone(),
                depth: redirect_depth,
            };
            log::error!("{}", err);
            return NavigationResult::Blocked {
                reason: err.to_string(),
                redirect: None,
            };
        }

        let from = self.current_path().to_string();
        log::info!("navigation {:?}: '{}' → '{}'", op, from, target);

        // Step 1: resolve the candidate chain (query never participates).
        let (path_part, query) = split_query(&target);
        let normalized = normalize_path(path_part).into_owned();
        let candidate = self.resolve_cached(&normalized);

        let full = match query {
            Some(q) => format!("{}?{}", normalized, q),
            None => normalized.clone(),
        };

        let request = NavigationRequest {
            from: Some(from),
            path: normalized,
            query: query.map(str::to_string),
            meta: candidate.leaf_meta(),
            params: candidate.params(),
        };

        // Step 2: guards, priority order, first non-continue verdict wins.
        match self.run_guards(cx, &request) {
            NavigationAction::Continue => {}
            NavigationAction::Deny { reason } => {
                log::warn!("navigation to '{}' blocked: {}", full, reason);
                return NavigationResult::Blocked {
                    reason,
                    redirect: None,
                };
            }
            NavigationAction::Redirect { to, reason } => {
                log::debug!(
                    "guard redirecting '{}' → '{}' ({})",
                    full,
                    to,
                    reason.as_deref().unwrap_or("no reason")
                );
                return self.navigate_with_pipeline(to, cx, NavigateOp::Push, redirect_depth + 1);
            }
        }

        // Step 3: commit the history movement and publish the stack.
        let event = match op {
            NavigateOp::Push => self.state.push(full.clone()),
            NavigateOp::Replace => self.state.replace(full.clone()),
            NavigateOp::Back => self
                .state
                .back()
                .expect("back() should succeed after peek"),
            NavigateOp::Forward => self
                .state
                .forward()
                .expect("forward() should succeed after peek"),
        };
        self.match_stack = candidate;

        if self.match_stack.is_empty() {
            log::warn!("{}", NavigationError::RouteNotFound { path: full.clone() });
            return NavigationResult::NotFound { path: event.to };
        }

        log::info!(
            "navigation complete: '{}' (stack depth: {})",
            event.to,
            self.match_stack.len()
        );
        NavigationResult::Success { path: event.to }
    }

    fn run_guards(&self, cx: &App, request: &NavigationRequest) -> NavigationAction {
        let mut ordered: Vec<&dyn RouteGuard> = self.guards.iter().map(AsRef::as_ref).collect();
        ordered.sort_by_key(|g| std::cmp::Reverse(g.priority()));

        for guard in ordered {
            let verdict = guard.check(cx, request);
            log::trace!(
                "guard '{}' (priority {}) → {:?}",
                guard.name(),
                guard.priority(),
                verdict
            );
            if !verdict.is_continue() {
                return verdict;
            }
        }
        NavigationAction::Continue
    }

    /// Re-resolve the match stack for the current path (after table edits).
    fn re_resolve(&mut self) {
        let (path, _) = split_query(self.state.current_path());
        let normalized = normalize_path(path).into_owned();
        self.match_stack = self.resolve_cached(&normalized);
    }

    fn resolve_cached(&mut self, path: &str) -> MatchStack {
        if let Some(stack) = self.resolve_cache.get(path) {
            log::trace!("resolution cache hit for '{}'", path);
            return stack.clone();
        }
        let stack = resolve_route_stack(self.state.routes(), path);
        self.resolve_cache.put(path.to_string(), stack.clone());
        stack
    }
}

/// Join an accumulated prefix with a (possibly relative or empty) route path.
fn join_paths(prefix: &str, path: &str) -> String {
    let prefix = trim_slashes(prefix);
    let path = trim_slashes(path);

    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => format!("/{prefix}"),
        (false, false) => format!("/{prefix}/{path}"),
    }
}

// ============================================================================
// UseRouter trait
// ============================================================================

/// Access the global router from an app context.
pub trait UseRouter {
    /// Get a reference to the global router.
    fn router(&self) -> &AppRouter;

    /// Update the global router.
    fn update_router<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut AppRouter, &mut App) -> R;
}

impl UseRouter for App {
    fn router(&self) -> &AppRouter {
        self.global::<AppRouter>()
    }

    fn update_router<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut AppRouter, &mut App) -> R,
    {
        self.update_global(f)
    }
}

// ============================================================================
// init_router
// ============================================================================

/// Initialize the global router with routes and guards.
///
/// ```ignore
/// use studydeck::{init_router, Route};
///
/// init_router(cx, |router| {
///     router.add_route(Route::view("/", || gpui::div().into_any_element()).name("Home"));
/// });
/// ```
pub fn init_router<F>(cx: &mut App, configure: F)
where
    F: FnOnce(&mut AppRouter),
{
    let mut router = AppRouter::new();
    configure(&mut router);
    cx.set_global(router);
}

// ============================================================================
// Navigator
// ============================================================================

/// Static navigation API over the global router.
///
/// All methods run the full pipeline (resolution, guards) and refresh the
/// windows so the new route renders.
///
/// ```ignore
/// use studydeck::Navigator;
///
/// Navigator::push(cx, "/dashboard/profile");
/// Navigator::pop(cx);
/// ```
pub struct Navigator;

impl Navigator {
    /// Navigate to a new path.
    pub fn push(cx: &mut (impl BorrowAppContext + BorrowMut<App>), path: impl Into<String>) {
        let path = path.into();
        cx.update_global::<AppRouter, _>(|router, cx| {
            let app: &App = cx.borrow_mut();
            router.push(path, app);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Replace the current path without adding to history.
    pub fn replace(cx: &mut (impl BorrowAppContext + BorrowMut<App>), path: impl Into<String>) {
        let path = path.into();
        cx.update_global::<AppRouter, _>(|router, cx| {
            let app: &App = cx.borrow_mut();
            router.replace(path, app);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Go back to the previous route.
    pub fn pop(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) {
        cx.update_global::<AppRouter, _>(|router, cx| {
            let app: &App = cx.borrow_mut();
            router.back(app);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Alias for [`pop`](Navigator::pop).
    pub fn back(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) {
        Self::pop(cx);
    }

    /// Go forward in history.
    pub fn forward(cx: &mut (impl BorrowAppContext + BorrowMut<App>)) {
        cx.update_global::<AppRouter, _>(|router, cx| {
            let app: &App = cx.borrow_mut();
            router.forward(app);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Navigate to a named route.
    pub fn push_named(cx: &mut (impl BorrowAppContext + BorrowMut<App>), name: &str) {
        let name = name.to_string();
        cx.update_global::<AppRouter, _>(|router, cx| {
            let Some(path) = router.path_for(&name).map(str::to_string) else {
                log::warn!("named route '{}' not found in registry", name);
                return;
            };
            let app: &App = cx.borrow_mut();
            router.push(path, app);
        });
        cx.borrow_mut().refresh_windows();
    }

    /// Current full path.
    pub fn current_path(cx: &App) -> String {
        cx.global::<AppRouter>().current_path().to_string()
    }

    /// Current raw query string, if any.
    pub fn current_query(cx: &App) -> Option<String> {
        cx.global::<AppRouter>().current_query().map(str::to_string)
    }

    /// Full path registered for a route name.
    pub fn path_for(cx: &App, name: &str) -> Option<String> {
        cx.global::<AppRouter>().path_for(name).map(str::to_string)
    }

    /// Whether history can move back.
    pub fn can_pop(cx: &App) -> bool {
        cx.global::<AppRouter>().can_go_back()
    }

    /// Whether history can move forward.
    pub fn can_go_forward(cx: &App) -> bool {
        cx.global::<AppRouter>().can_go_forward()
    }
}

// ============================================================================
// Tests
// ============================================================================
