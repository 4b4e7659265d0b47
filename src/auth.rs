//! Credential storage and the login/logout collaborator surface.
//!
//! The navigation guard never touches real storage directly: it depends on
//! the [`CredentialStore`] capability, so tests substitute token
//! presence/absence without a session file on disk.
//!
//! Semantics are deliberately **presence-only**: any non-empty stored string
//! authorizes, with no expiry or structural validation. Token issuance is an
//! external concern — the OAuth completion flow calls [`finish_login`], a
//! logout action calls [`logout`]; the guard itself is read-only over this
//! state.
//!
//! | Type | Backing | Use |
//! |------|---------|-----|
//! | [`FileCredentialStore`] | JSON session file | the running app |
//! | [`MemoryCredentialStore`] | in-process `Mutex` | tests, previews |

use crate::{Navigator, QueryParams};
use gpui::{App, Global};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key for the credential token, mirrored in the session file.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Default resume target when a login completes without a pending redirect.
const DEFAULT_POST_LOGIN_PATH: &str = "/dashboard";

// ============================================================================
// CredentialStore
// ============================================================================

/// Capability for reading and writing the single credential slot.
///
/// Implementations must be cheap to read: the guard performs a synchronous
/// lookup on every navigation.
pub trait CredentialStore: Send + Sync {
    /// Current token, if any. An empty string is as good as absent.
    fn token(&self) -> Option<String>;

    /// Store a token, replacing any previous value.
    fn set_token(&self, token: &str);

    /// Remove the stored token.
    fn clear_token(&self);

    /// Presence-only authorization check: a non-empty stored token.
    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}

// ============================================================================
// MemoryCredentialStore
// ============================================================================

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .expect("credential store mutex poisoned")
            .clone()
    }

    fn set_token(&self, token: &str) {
        *self.token.lock().expect("credential store mutex poisoned") =
            Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.lock().expect("credential store mutex poisoned") = None;
    }
}

// ============================================================================
// FileCredentialStore
// ============================================================================

/// On-disk JSON session file holding the single `auth_token` entry.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    auth_token: Option<String>,
}

/// Credential store persisted as a small JSON file.
///
/// Reads are permissive: a missing, unreadable, or malformed file reads as
/// "no token" rather than an error, matching the guard's permissive
/// treatment of absent state.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SessionFile {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "malformed session file {}: {}",
                    self.path.display(),
                    err
                );
                SessionFile::default()
            }),
            Err(_) => SessionFile::default(),
        }
    }

    fn write(&self, session: &SessionFile) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::error!("failed to create {}: {}", parent.display(), err);
                return;
            }
        }
        match serde_json::to_string_pretty(session) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&self.path, json) {
                    log::error!(
                        "failed to write session file {}: {}",
                        self.path.display(),
                        err
                    );
                }
            }
            Err(err) => log::error!("failed to serialize session: {}", err),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        self.read().auth_token
    }

    fn set_token(&self, token: &str) {
        self.write(&SessionFile {
            auth_token: Some(token.to_string()),
        });
        log::info!("credential token stored ({})", AUTH_TOKEN_KEY);
    }

    fn clear_token(&self) {
        self.write(&SessionFile { auth_token: None });
        log::info!("credential token cleared ({})", AUTH_TOKEN_KEY);
    }
}

// ============================================================================
// AuthSession global
// ============================================================================

/// App-wide handle to the credential store, registered as a GPUI global so
/// collaborator flows (login completion, logout) reach the same slot the
/// guard was constructed with.
pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
}

impl Global for AuthSession {}

impl AuthSession {
    /// Register the shared store as a global.
    pub fn init(cx: &mut App, store: Arc<dyn CredentialStore>) {
        cx.set_global(Self { store });
    }

    /// Clone the shared store handle.
    pub fn store(cx: &App) -> Arc<dyn CredentialStore> {
        Arc::clone(&cx.global::<Self>().store)
    }
}

// ============================================================================
// Collaborator flows
// ============================================================================

/// Complete an external login: persist the token, then resume the pending
/// `redirect` target (URL-decoded) or fall back to the dashboard.
///
/// Uses `replace` so the completion page does not linger in history.
pub fn finish_login(cx: &mut App, token: &str) {
    AuthSession::store(cx).set_token(token);

    let target = Navigator::current_query(cx)
        .map(|q| QueryParams::from_query_string(&q))
        .and_then(|q| q.get("redirect").cloned())
        .unwrap_or_else(|| DEFAULT_POST_LOGIN_PATH.to_string());

    log::info!("login complete, resuming '{}'", target);
    Navigator::replace(cx, target);
}

/// Clear the stored credential. Navigation afterwards is the caller's call —
/// the next guarded transition will redirect on its own.
pub fn logout(cx: &mut App) {
    AuthSession::store(cx).clear_token();
}

// ============================================================================
// Tests
// ============================================================================
