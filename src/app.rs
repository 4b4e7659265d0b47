//! Application bootstrap.
//!
//! Mount order matters: the credential store and router globals must exist
//! before the first window renders, because the initial frame already reads
//! the match stack and the guard already gates the initial path.

use crate::auth::{AuthSession, FileCredentialStore};
use crate::outlet::router_view;
use crate::router::init_router;
use crate::routes;
use gpui::prelude::*;
use gpui::{
    div, px, rgb, size, App, AppContext, Application, Bounds, Context, TitlebarOptions, Window,
    WindowBounds, WindowOptions,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Run the application: logger, credential store, router, window.
pub fn run() {
    env_logger::init();

    let store = Arc::new(FileCredentialStore::new(default_session_path()));
    log::info!("session file: {}", store.path().display());

    Application::new().run(move |cx: &mut App| {
        AuthSession::init(cx, store.clone());
        init_router(cx, |router| routes::install(router, store.clone()));

        let bounds = Bounds::centered(None, size(px(1100.), px(720.)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("StudyDeck".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_, cx| cx.new(RootView::new),
        )
        .expect("failed to open main window");

        cx.activate(true);
    });
}

/// Session file location: `$XDG_DATA_HOME` (or `~/.local/share`) with a
/// temp-dir fallback for stripped-down environments.
fn default_session_path() -> PathBuf {
    let base = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(std::env::temp_dir);
    base.join("studydeck").join("session.json")
}

// ============================================================================
// Root view
// ============================================================================

/// Top-level window component: a styled container around [`router_view`].
struct RootView;

impl RootView {
    fn new(_cx: &mut Context<'_, Self>) -> Self {
        Self
    }
}

impl Render for RootView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        div()
            .size_full()
            .bg(rgb(0x1e1e1e))
            .text_color(rgb(0xffffff))
            .child(router_view(window, cx))
    }
}
