//! Route declarations.
//!
//! A [`Route`] binds a path pattern to a view builder, an optional unique
//! name, typed [`RouteMeta`] flags, and an ordered list of children whose
//! paths are relative to the parent. An empty child path (`""`) marks the
//! parent's index route — the default child rendered when the parent path
//! matches exactly.
//!
//! Routes are declarative configuration: matching lives in
//! [`resolve`](crate::resolve), access control in [`guard`](crate::guard).
//!
//! # Example
//!
//! ```no_run
//! use gpui::IntoElement;
//! use std::sync::Arc;
//! use studydeck::Route;
//!
//! Route::new("/dashboard", |_, _cx, _params| gpui::div().into_any_element())
//!     .requires_auth(true)
//!     .children(vec![
//!         Arc::new(
//!             Route::view("", || gpui::div().into_any_element())
//!                 .name("First")
//!                 .requires_auth(true),
//!         ),
//!         Arc::new(
//!             Route::view("profile", || gpui::div().into_any_element())
//!                 .name("Profile")
//!                 .requires_auth(true),
//!         ),
//!     ]);
//! ```

use crate::RouteParams;
use gpui::{AnyElement, App, Window};
use std::fmt;
use std::sync::Arc;

/// Function that builds the view for a matched route.
///
/// Receives the window, the app context, and the accumulated route
/// parameters for the matched chain.
pub type ViewBuilder = Arc<dyn Fn(&mut Window, &mut App, &RouteParams) -> AnyElement + Send + Sync>;

// ============================================================================
// RouteMeta
// ============================================================================

/// Typed per-route metadata flags.
///
/// Absent metadata is equivalent to the default: no flag set. In particular
/// a route without `requires_auth` is always open — the guard treats missing
/// metadata permissively.
///
/// Metadata is **not** inherited from ancestors: the navigation guard only
/// consults the matched leaf's own `RouteMeta`, so protected sections must
/// set the flag on every child explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Entry requires a stored credential token to be present.
    pub requires_auth: bool,
}

impl RouteMeta {
    /// Metadata with no flags set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Metadata requiring authentication.
    pub fn auth_required() -> Self {
        Self {
            requires_auth: true,
        }
    }
}

// ============================================================================
// RouteConfig
// ============================================================================

/// Static configuration of a route entry.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Path pattern. Absolute for top-level routes (`/dashboard`), relative
    /// for children (`profile`), empty for index routes.
    pub path: String,
    /// Unique identifier across the whole table, used for name-based lookup
    /// (e.g. the guard's `Home` fallback). Uniqueness is enforced at
    /// registration.
    pub name: Option<String>,
    /// Typed metadata flags.
    pub meta: RouteMeta,
}

// ============================================================================
// Route
// ============================================================================

/// A declarative binding from a path to a view, with metadata and children.
pub struct Route {
    /// Static configuration (path, name, meta).
    pub config: RouteConfig,
    /// View builder; `None` for placeholder/layout-less entries.
    builder: Option<ViewBuilder>,
    /// Ordered children; paths are relative to this route.
    pub children: Vec<Arc<Route>>,
}

impl Route {
    /// Create a route with a full view builder (window + context + params).
    pub fn new<F>(path: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&mut Window, &mut App, &RouteParams) -> AnyElement + Send + Sync + 'static,
    {
        Self {
            config: RouteConfig {
                path: path.into(),
                name: None,
                meta: RouteMeta::default(),
            },
            builder: Some(Arc::new(builder)),
            children: Vec::new(),
        }
    }

    /// Create a route from a parameterless element function.
    ///
    /// Convenience for simple pages that need neither context nor params.
    pub fn view<F>(path: impl Into<String>, builder: F) -> Self
    where
        F: Fn() -> AnyElement + Send + Sync + 'static,
    {
        Self::new(path, move |_, _, _| builder())
    }

    /// Set the route's unique name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Replace the route's metadata wholesale.
    #[must_use]
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.config.meta = meta;
        self
    }

    /// Set or clear the `requires_auth` metadata flag.
    #[must_use]
    pub fn requires_auth(mut self, required: bool) -> Self {
        self.config.meta.requires_auth = required;
        self
    }

    /// Attach child routes.
    #[must_use]
    pub fn children(mut self, children: Vec<Arc<Route>>) -> Self {
        self.children = children;
        self
    }

    /// Get this route's children.
    pub fn get_children(&self) -> &[Arc<Route>] {
        &self.children
    }

    /// Build the view for this route.
    ///
    /// Returns `None` if the route has no builder.
    pub fn build(
        &self,
        window: &mut Window,
        cx: &mut App,
        params: &RouteParams,
    ) -> Option<AnyElement> {
        self.builder
            .as_ref()
            .map(|builder| builder(window, cx, params))
    }

    /// Whether this route has a view builder.
    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("config", &self.config)
            .field("has_builder", &self.builder.is_some())
            .field("children", &self.children)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
