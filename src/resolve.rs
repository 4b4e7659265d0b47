//! Route resolution via match stack.
//!
//! The router resolves the **entire chain of matched routes once** per
//! navigation instead of each outlet searching the tree at render time. The
//! result is a [`MatchStack`] — one [`MatchEntry`] per nesting level — and
//! every outlet simply reads its entry by depth index.
//!
//! Given the application table:
//!
//! ```text
//! /                  Home
//! /dashboard         (layout, protected)
//!   ""               First (index)
//!   profile          Profile
//!   ai               Ai
//! /adashboard        Adashboard
//! ```
//!
//! path `/dashboard/profile` resolves to:
//!
//! ```text
//! [0] Route("/dashboard")   ← router_view renders this
//! [1] Route("profile")      ← outlet depth 1
//! ```
//!
//! and `/dashboard` alone resolves to `[/dashboard, ""]` — the empty-path
//! child is the parent's index route.
//!
//! Query strings are not part of matching: callers split them off with
//! [`split_query`] before resolving.

use crate::route::Route;
use crate::RouteParams;
use std::borrow::Cow;
use std::cell::Cell;
use std::sync::Arc;

// ============================================================================
// Path helpers
// ============================================================================

/// Split a requested path into its path and query parts.
///
/// # Examples
///
/// ```
/// use studydeck::split_query;
///
/// assert_eq!(split_query("/dashboard/profile"), ("/dashboard/profile", None));
/// assert_eq!(split_query("/?redirect=%2Fx"), ("/", Some("redirect=%2Fx")));
/// ```
pub fn split_query(full: &str) -> (&str, Option<&str>) {
    match full.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (full, None),
    }
}

/// Normalize a path for consistent comparison.
///
/// Ensures a leading slash and no trailing slash (unless root). Returns
/// `Cow<str>` to avoid allocation when the path is already normalized.
///
/// # Examples
///
/// ```
/// use studydeck::normalize_path;
///
/// assert_eq!(normalize_path("/dashboard"), "/dashboard");
/// assert_eq!(normalize_path("dashboard"), "/dashboard");
/// assert_eq!(normalize_path("/dashboard/"), "/dashboard");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &'_ str) -> Cow<'_, str> {
    if path.is_empty() || path == "/" {
        return Cow::Borrowed("/");
    }

    if path.starts_with('/') && !path.ends_with('/') {
        return Cow::Borrowed(path);
    }

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{trimmed}"))
    }
}

/// Strip leading and trailing slashes from a route path segment.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Split a route path into non-empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

// ============================================================================
// Outlet depth tracking (thread-local)
// ============================================================================

thread_local! {
    /// Depth of the outlet currently rendering. `router_view` resets this to
    /// 0; each nested outlet claims the next depth.
    static OUTLET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Reset outlet depth to 0. Called at the start of `router_view`.
pub fn reset_outlet_depth() {
    OUTLET_DEPTH.with(|d| d.set(0));
}

/// Claim the next outlet depth and return it.
///
/// The caller renders `match_stack[returned depth]`.
pub fn claim_outlet_depth() -> usize {
    OUTLET_DEPTH.with(|d| {
        let next = d.get() + 1;
        d.set(next);
        next
    })
}

// ============================================================================
// Match stack
// ============================================================================

/// A single matched level of the route hierarchy.
#[derive(Debug, Clone)]
pub struct MatchEntry {
    /// The matched route at this level.
    pub route: Arc<Route>,
    /// Accumulated params from the root down to this level.
    pub params: RouteParams,
    /// Depth in the hierarchy (0 = top-level route).
    pub depth: usize,
}

/// The full resolved route chain for a path.
///
/// Built once per navigation, consumed by outlets by depth index.
#[derive(Debug, Clone, Default)]
pub struct MatchStack {
    entries: Vec<MatchEntry>,
}

impl MatchStack {
    /// Create an empty match stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the entry at a specific depth.
    pub fn at_depth(&self, depth: usize) -> Option<&MatchEntry> {
        self.entries.get(depth)
    }

    /// Get the root (depth 0) entry.
    pub fn root(&self) -> Option<&MatchEntry> {
        self.entries.first()
    }

    /// Get the leaf (deepest) entry.
    pub fn leaf(&self) -> Option<&MatchEntry> {
        self.entries.last()
    }

    /// Metadata of the matched leaf, or the permissive default when nothing
    /// matched. The guard evaluates exactly this — no ancestor merging.
    pub fn leaf_meta(&self) -> crate::RouteMeta {
        self.leaf().map_or_else(Default::default, |e| e.route.config.meta)
    }

    /// Accumulated params at the deepest level.
    pub fn params(&self) -> RouteParams {
        self.leaf().map(|e| e.params.clone()).unwrap_or_default()
    }

    /// Number of matched levels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no routes matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, root to leaf.
    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Maximum nesting depth, guarding against circular route trees.
const MAX_DEPTH: usize = 16;

/// Resolve the full match stack for a path against the route table.
///
/// The path must already be query-stripped (see [`split_query`]). Returns an
/// empty stack when nothing matches — the 404 condition handled by the
/// rendering shell.
pub fn resolve_route_stack(routes: &[Arc<Route>], path: &str) -> MatchStack {
    let normalized = normalize_path(path);
    let segs = segments(&normalized);

    let mut stack = MatchStack::new();
    resolve_level(routes, &segs, 0, &RouteParams::new(), &mut stack);

    log::debug!(
        "resolved '{}' → {} level(s): [{}]",
        path,
        stack.len(),
        stack
            .entries
            .iter()
            .map(|e| format!("\"{}\"", e.route.config.path))
            .collect::<Vec<_>>()
            .join(" → ")
    );

    stack
}

/// Try each route at one level, recursing into children with backtracking.
///
/// Returns `true` once a complete match is found (all segments consumed,
/// descending into an index child where one exists).
fn resolve_level(
    routes: &[Arc<Route>],
    remaining: &[&str],
    depth: usize,
    inherited: &RouteParams,
    stack: &mut MatchStack,
) -> bool {
    if depth >= MAX_DEPTH {
        log::warn!(
            "maximum route nesting depth ({}) exceeded; check for circular routes",
            MAX_DEPTH
        );
        return false;
    }

    for route in routes {
        let route_segs = segments(trim_slashes(&route.config.path));

        // Index / layout route: empty path.
        if route_segs.is_empty() {
            if remaining.is_empty() {
                stack.entries.push(MatchEntry {
                    route: Arc::clone(route),
                    params: inherited.clone(),
                    depth,
                });
                descend_index(route, depth + 1, inherited, stack);
                return true;
            }

            // Layout wrapping children: match anything its children match.
            if !route.children.is_empty() {
                stack.entries.push(MatchEntry {
                    route: Arc::clone(route),
                    params: inherited.clone(),
                    depth,
                });
                if resolve_level(&route.children, remaining, depth + 1, inherited, stack) {
                    return true;
                }
                stack.entries.pop();
            }
            continue;
        }

        if route_segs.len() > remaining.len() {
            continue;
        }

        let mut params = inherited.clone();
        let matched = route_segs.iter().zip(remaining.iter()).all(|(rs, ps)| {
            if let Some(name) = rs.strip_prefix(':') {
                params.insert(name.to_string(), (*ps).to_string());
                true
            } else {
                rs == ps
            }
        });

        if !matched {
            continue;
        }

        let after = &remaining[route_segs.len()..];
        stack.entries.push(MatchEntry {
            route: Arc::clone(route),
            params: params.clone(),
            depth,
        });

        if after.is_empty() {
            descend_index(route, depth + 1, &params, stack);
            return true;
        }

        if !route.children.is_empty()
            && resolve_level(&route.children, after, depth + 1, &params, stack)
        {
            return true;
        }

        stack.entries.pop();
    }

    false
}

/// Push the index child (empty path) when the parent matched exactly.
///
/// Ensures `/dashboard` renders the default child. Index chains recurse, so
/// an index route that itself has an index child resolves fully.
fn descend_index(route: &Arc<Route>, depth: usize, params: &RouteParams, stack: &mut MatchStack) {
    if route.children.is_empty() {
        return;
    }
    for child in &route.children {
        if trim_slashes(&child.config.path).is_empty() {
            stack.entries.push(MatchEntry {
                route: Arc::clone(child),
                params: params.clone(),
                depth,
            });
            descend_index(child, depth + 1, params, stack);
            return;
        }
    }
}

// ============================================================================
// Tests — resolution of full tables lives in tests/resolve_tests.rs; only
// the pure path helpers are covered here.
// ============================================================================
