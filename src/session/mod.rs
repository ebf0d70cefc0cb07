// src/session/mod.rs — Session credential storage
//
// The bearer token lives in a browser cookie named `authToken`. Both the
// navigation guard and the request gateway see the credential through the
// `SessionStore` trait so tests can substitute an in-memory store for the
// real cookie-backed one.

use std::sync::Mutex;

/// Cookie that carries the session credential.
pub const SESSION_COOKIE: &str = "authToken";

/// Credential lifetime: 7 days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Injected credential accessor for the request gateway.
///
/// `set`/`clear` take `&self`: implementations use interior mutability so a
/// store can be shared behind an `Arc` across a request's call sites.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

// ─── In-memory store ────────────────────────────────────────────────────────

/// Mutex-held token, used by tests and one-shot callers.
#[derive(Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("session lock poisoned").clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().expect("session lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("session lock poisoned") = None;
    }
}

// ─── Cookie-backed store ────────────────────────────────────────────────────

/// Pending cookie mutation recorded by a `CookieSession`. The web layer
/// drains this into a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieChange {
    Set(String),
    Clear,
}

/// Per-request store seeded from the incoming `Cookie` header.
///
/// Reads are answered from the seeded value; `set`/`clear` update it and
/// record the change so the response can rewrite the browser cookie.
pub struct CookieSession {
    token: Mutex<Option<String>>,
    change: Mutex<Option<CookieChange>>,
}

impl CookieSession {
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let token = header.and_then(token_from_cookie_header);
        Self {
            token: Mutex::new(token),
            change: Mutex::new(None),
        }
    }

    /// Take the pending cookie mutation, if any. Idempotent: a second call
    /// returns `None`.
    pub fn take_change(&self) -> Option<CookieChange> {
        self.change.lock().expect("session lock poisoned").take()
    }
}

impl SessionStore for CookieSession {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("session lock poisoned").clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().expect("session lock poisoned") = Some(token.to_string());
        *self.change.lock().expect("session lock poisoned") =
            Some(CookieChange::Set(token.to_string()));
    }

    fn clear(&self) {
        *self.token.lock().expect("session lock poisoned") = None;
        *self.change.lock().expect("session lock poisoned") = Some(CookieChange::Clear);
    }
}

// ─── Cookie codec ───────────────────────────────────────────────────────────

/// Extract the session token from a `Cookie` request header.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Build the `Set-Cookie` value that installs the credential for 7 days.
/// `SameSite=Lax` guards against CSRF; `Secure` is added for production.
pub fn set_cookie_value(token: &str, secure: bool) -> String {
    let expires = chrono::Utc::now() + chrono::Duration::days(SESSION_TTL_DAYS);
    let mut value = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; Expires={}; SameSite=Lax; HttpOnly",
        SESSION_TTL_DAYS * 24 * 60 * 60,
        expires.format("%a, %d %b %Y %H:%M:%S GMT"),
    );
    if secure {
        value.push_str("; Secure");
    }
    value
}

/// Build the `Set-Cookie` value that removes the credential.
pub fn clear_cookie_value(secure: bool) -> String {
    let mut value = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax; HttpOnly");
    if secure {
        value.push_str("; Secure");
    }
    value
}
