//! StudyDeck application shell: bootstrap, route table, and auth guard.
//!
//! This crate is the navigation layer of a GPUI desktop app. It declares a
//! tree of path-to-view bindings (with a protected dashboard section),
//! resolves requested paths to a match stack, and gates protected routes
//! behind a presence-only credential check before any transition commits.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`route`] | Route declarations: paths, names, [`RouteMeta`] flags, children |
//! | [`routes`] | The concrete application table and guard installation |
//! | [`resolve`] | Path → [`MatchStack`] resolution (index routes, `:param`s) |
//! | [`params`] | Path params and query strings (incl. `redirect` encoding) |
//! | [`guard`] | [`RouteGuard`] trait and the credential-backed [`AuthGuard`] |
//! | [`auth`] | [`CredentialStore`] capability, session file, login/logout |
//! | [`router`] | Global [`AppRouter`], navigation pipeline, [`Navigator`] |
//! | [`state`] | History stack (push / replace / back / forward) |
//! | [`outlet`] | [`router_view`] / [`render_outlet`] rendering shell |
//! | [`error`] | [`NavigationResult`] / [`NavigationError`] |
//! | [`views`] | Placeholder pages |
//! | [`app`] | Window bootstrap |
//!
//! # Navigation pipeline
//!
//! ```text
//! push("/dashboard/profile")
//!   → resolve match stack          (query split off, index routes applied)
//!   → guards, priority order       (AuthGuard reads the leaf's own meta)
//!       ├─ Continue  → commit history, publish stack, render
//!       ├─ Redirect  → re-enter pipeline ("/?redirect=%2Fdashboard%2Fprofile")
//!       └─ Deny      → Blocked, nothing commits
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use studydeck::{init_router, routes, AuthSession, MemoryCredentialStore};
//!
//! let store = Arc::new(MemoryCredentialStore::new());
//! AuthSession::init(cx, store.clone());
//! init_router(cx, |router| routes::install(router, store));
//! ```

pub mod app;
pub mod auth;
pub mod error;
pub mod guard;
pub mod outlet;
pub mod params;
pub mod resolve;
pub mod route;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;

pub use auth::{
    finish_login, logout, AuthSession, CredentialStore, FileCredentialStore,
    MemoryCredentialStore, AUTH_TOKEN_KEY,
};
pub use error::{NavigationError, NavigationResult};
pub use guard::{guard_fn, AuthGuard, FnGuard, NavigationAction, RouteGuard};
pub use outlet::{render_outlet, router_view};
pub use params::{decode_component, encode_component, QueryParams, RouteParams};
pub use resolve::{
    claim_outlet_depth, normalize_path, reset_outlet_depth, resolve_route_stack, split_query,
    MatchEntry, MatchStack,
};
pub use route::{Route, RouteConfig, RouteMeta, ViewBuilder};
pub use router::{
    init_router, AppRouter, NamedRouteRegistry, NavigationRequest, Navigator, UseRouter,
};
pub use state::{NavigationDirection, RouteChangeEvent, RouterState};
