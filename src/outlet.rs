//! Rendering shell: root view and nested outlets.
//!
//! The router resolves the match stack once per navigation; rendering just
//! reads it by depth:
//!
//! - [`router_view`] renders the **root** matched route (depth 0). Place it
//!   once in the window's top-level `Render` impl.
//! - [`render_outlet`] renders the **child** route at the next nesting
//!   depth. Call it inside a layout route's builder (the dashboard layout
//!   uses it to host its section pages).
//!
//! Unmatched paths get the built-in 404 page — the "unresolvable path"
//! condition the navigation layer deliberately leaves to the shell.
//!
//! ```text
//! navigation → resolve_route_stack() → [depth 0, depth 1, …]
//!                                         ↑          ↑
//!                                    router_view  render_outlet
//! ```

use crate::resolve::{claim_outlet_depth, reset_outlet_depth};
use crate::router::AppRouter;
use gpui::prelude::*;
use gpui::{div, px, rgb, AnyElement, App, Context, FontWeight, Window};

/// Render the top-level matched route (depth 0).
///
/// Resets outlet depth tracking, so any [`render_outlet`] call inside the
/// root builder lands on depth 1, 2, … in declaration order.
pub fn router_view<V>(window: &mut Window, cx: &mut Context<'_, V>) -> AnyElement {
    reset_outlet_depth();

    let resolved = {
        let Some(router) = cx.try_global::<AppRouter>() else {
            return div().child("No router configured").into_any_element();
        };

        let stack = router.match_stack();
        let Some(root) = stack.root() else {
            let current_path = router.current_path().to_string();
            return not_found_page(&current_path).into_any_element();
        };

        log::debug!(
            "router_view: rendering root route '{}' (stack depth {})",
            root.route.config.path,
            stack.len()
        );
        (std::sync::Arc::clone(&root.route), root.params.clone())
    }; // router borrow ends here

    let (route, params) = resolved;

    route
        .build(window, cx, &params)
        .unwrap_or_else(|| div().child("Root route has no builder").into_any_element())
}

/// Render the matched child route at the next nesting depth.
///
/// Call from inside a layout route's builder. Renders an empty element when
/// the stack has no entry at this depth (e.g. a layout route visited with no
/// matching child).
pub fn render_outlet(window: &mut Window, cx: &mut App) -> AnyElement {
    let depth = claim_outlet_depth();

    let resolved = {
        let Some(router) = cx.try_global::<AppRouter>() else {
            return div().into_any_element();
        };

        let stack = router.match_stack();
        let Some(entry) = stack.at_depth(depth) else {
            log::trace!(
                "render_outlet: no entry at depth {} (stack len {})",
                depth,
                stack.len()
            );
            return div().into_any_element();
        };

        (std::sync::Arc::clone(&entry.route), entry.params.clone())
    }; // router borrow ends here

    let (route, params) = resolved;

    route
        .build(window, cx, &params)
        .unwrap_or_else(|| div().into_any_element())
}

/// Built-in minimalist 404 page.
pub(crate) fn not_found_page(path: &str) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .size_full()
        .bg(rgb(0x1e1e1e))
        .p_8()
        .gap_6()
        .child(
            div()
                .text_3xl()
                .font_weight(FontWeight::BOLD)
                .text_color(rgb(0xffffff))
                .child("404 — Page Not Found"),
        )
        .child(
            div()
                .text_base()
                .text_color(rgb(0xcccccc))
                .max_w(px(500.))
                .child(format!("No route matches: {}", path)),
        )
}
