//! Application pages.
//!
//! Presentation is out of scope for the navigation layer: these are minimal
//! render targets so the shell runs, plus the dashboard layout that hosts
//! the nested section outlet. The interesting parts live in the route table
//! and the guard, not here.

use crate::auth::{self, AuthSession};
use crate::outlet::render_outlet;
use crate::{Navigator, QueryParams};
use gpui::prelude::*;
use gpui::{div, px, rgb, AnyElement, App, FontWeight, MouseButton, SharedString, Window};

/// Demo token written by the in-app "complete sign-in" shortcut. A real
/// deployment receives the token from the external OAuth callback instead.
const DEMO_TOKEN: &str = "demo-session-token";

// ============================================================================
// Shared scaffolding
// ============================================================================

fn page_layout(
    title: &str,
    description: &str,
    accent: gpui::Rgba,
    extra: impl IntoElement,
) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .size_full()
        .p_8()
        .gap_6()
        .child(
            div()
                .flex()
                .items_center()
                .gap_4()
                .child(div().w_4().h(px(40.)).rounded_md().bg(accent))
                .child(
                    div()
                        .text_2xl()
                        .font_weight(FontWeight::BOLD)
                        .child(title.to_string()),
                ),
        )
        .child(
            div()
                .text_base()
                .text_color(rgb(0xaaaaaa))
                .max_w(px(600.))
                .child(description.to_string()),
        )
        .child(div().mt_2().child(extra))
}

/// Clickable navigation entry. Uses the raw mouse handler form so it can be
/// built from route builders, which only carry `&mut App`.
fn nav_button(path: &str, label: &str, current_path: &str) -> impl IntoElement {
    let is_active = current_path == path;
    let path = path.to_string();
    let label = label.to_string();

    div()
        .id(SharedString::from(format!("nav-{label}")))
        .px_3()
        .py_2()
        .rounded_md()
        .text_sm()
        .cursor_pointer()
        .when(is_active, |this| {
            this.bg(rgb(0x094771)).text_color(rgb(0xffffff))
        })
        .when(!is_active, |this| {
            this.text_color(rgb(0xcccccc))
                .hover(|this| this.bg(rgb(0x2a2d2e)))
        })
        .on_mouse_down(MouseButton::Left, move |_event, _window, cx| {
            Navigator::push(cx, path.clone());
        })
        .child(label)
}

fn section_label(text: &str) -> impl IntoElement {
    div()
        .text_sm()
        .font_weight(FontWeight::BOLD)
        .text_color(rgb(0xcccccc))
        .mb_1()
        .child(text.to_string())
}

// ============================================================================
// Home
// ============================================================================

pub fn home_page(cx: &mut App) -> AnyElement {
    let signed_in = AuthSession::store(cx).is_authenticated();
    // A denied navigation lands here with its original target in `redirect`.
    let pending_redirect = Navigator::current_query(cx)
        .map(|q| QueryParams::from_query_string(&q))
        .and_then(|q| q.get("redirect").cloned());
    let current_path = Navigator::current_path(cx);

    page_layout(
        "StudyDeck",
        "Your study dashboard: AI tutor, flash cards, and current affairs in one place.",
        rgb(0x2196f3),
        div()
            .flex()
            .flex_col()
            .gap_2()
            .when_some(pending_redirect, |this, target| {
                this.child(
                    div()
                        .p_4()
                        .rounded_md()
                        .bg(rgb(0x4a3a14))
                        .text_sm()
                        .text_color(rgb(0xffcc80))
                        .child(format!("Sign in to continue to {target}")),
                )
            })
            .child(section_label(if signed_in {
                "You are signed in."
            } else {
                "Sign in to open your dashboard."
            }))
            .child(nav_button("/dashboard", "Open dashboard", &current_path))
            .child(nav_button("/adashboard", "Admin board", &current_path))
            .child(nav_button(
                "/google-auth-finish",
                "Sign in with Google",
                &current_path,
            )),
    )
    .into_any_element()
}

// ============================================================================
// Dashboard layout + sections
// ============================================================================

/// Protected layout route: sidebar navigation plus the section outlet.
pub fn dashboard_layout(window: &mut Window, cx: &mut App) -> AnyElement {
    let current_path = Navigator::current_path(cx);

    div()
        .flex()
        .size_full()
        .bg(rgb(0x1e1e1e))
        .text_color(rgb(0xffffff))
        .child(
            div()
                .w(px(240.))
                .bg(rgb(0x252526))
                .border_r_1()
                .border_color(rgb(0x3e3e3e))
                .p_4()
                .flex()
                .flex_col()
                .gap_2()
                .child(section_label("Dashboard"))
                .child(nav_button("/dashboard", "Overview", &current_path))
                .child(nav_button("/dashboard/profile", "Profile", &current_path))
                .child(nav_button("/dashboard/ai", "AI Tutor", &current_path))
                .child(nav_button("/dashboard/flashai", "Flash Cards", &current_path))
                .child(nav_button(
                    "/dashboard/current_affair",
                    "Current Affairs",
                    &current_path,
                ))
                .child(div().h_px().bg(rgb(0x3e3e3e)).my_2())
                .child(
                    div()
                        .id("sign-out")
                        .px_3()
                        .py_2()
                        .rounded_md()
                        .text_sm()
                        .text_color(rgb(0xcccccc))
                        .cursor_pointer()
                        .hover(|this| this.bg(rgb(0x2a2d2e)))
                        .on_mouse_down(MouseButton::Left, |_event, _window, cx| {
                            auth::logout(cx);
                            Navigator::push(cx, "/");
                        })
                        .child("Sign out"),
                ),
        )
        .child(div().flex_1().child(render_outlet(window, cx)))
        .into_any_element()
}

pub fn overview_page() -> AnyElement {
    page_layout(
        "Overview",
        "Pick a section from the sidebar to get started.",
        rgb(0x4caf50),
        div(),
    )
    .into_any_element()
}

pub fn profile_page(cx: &mut App) -> AnyElement {
    let signed_in = AuthSession::store(cx).is_authenticated();
    page_layout(
        "Profile",
        "Your account details.",
        rgb(0x9c27b0),
        div().text_sm().child(if signed_in {
            "Session active."
        } else {
            "No active session."
        }),
    )
    .into_any_element()
}

pub fn ai_page() -> AnyElement {
    page_layout(
        "AI Tutor",
        "Ask questions, get explanations.",
        rgb(0x00bcd4),
        div(),
    )
    .into_any_element()
}

pub fn flashai_page() -> AnyElement {
    page_layout(
        "Flash Cards",
        "AI-generated flash cards for quick revision.",
        rgb(0xff9800),
        div(),
    )
    .into_any_element()
}

pub fn current_affairs_page() -> AnyElement {
    page_layout(
        "Current Affairs",
        "Daily digest of what matters.",
        rgb(0xf44336),
        div(),
    )
    .into_any_element()
}

// ============================================================================
// Admin board
// ============================================================================

pub fn admin_page() -> AnyElement {
    page_layout(
        "Admin Board",
        "Administrative overview.",
        rgb(0x795548),
        div(),
    )
    .into_any_element()
}

// ============================================================================
// Auth completion
// ============================================================================

/// Landing page of the external OAuth callback
/// (`/google-auth-finish?redirect=<path>&token=<jwt>`).
///
/// The callback hands its token to [`auth::finish_login`], which stores it
/// and resumes the pending `redirect` target. Completion is triggered from
/// the button (navigating mid-render would re-enter the router); without a
/// deep-linked token the button falls back to a demo token so the flow can
/// be exercised without a browser.
pub fn auth_finish_page(cx: &mut App) -> AnyElement {
    let deep_link_token = Navigator::current_query(cx)
        .map(|q| QueryParams::from_query_string(&q))
        .and_then(|q| q.get("token").cloned());

    let (label, description) = if deep_link_token.is_some() {
        ("Continue", "Sign-in provider returned a token.")
    } else {
        (
            "Complete sign-in (demo token)",
            "Waiting for the sign-in provider to hand back a token.",
        )
    };

    page_layout(
        "Sign in",
        description,
        rgb(0x607d8b),
        div()
            .id("complete-sign-in")
            .px_3()
            .py_2()
            .rounded_md()
            .text_sm()
            .bg(rgb(0x1b5e20))
            .cursor_pointer()
            .hover(|this| this.bg(rgb(0x2e7d32)))
            .on_mouse_down(MouseButton::Left, move |_event, _window, cx| {
                let token = deep_link_token.clone().unwrap_or_else(|| DEMO_TOKEN.into());
                auth::finish_login(cx, &token);
            })
            .child(label),
    )
    .into_any_element()
}
