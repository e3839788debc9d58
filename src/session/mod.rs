pub mod storage;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::api::dto::{LoginRequest, SignupRequest};
use crate::api::PlatformApi;
use crate::models::{User, UserRole};

pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};

/// Storage keys owned by the session. They are written and cleared as one
/// unit: a session with any of them missing is treated as no session at all.
pub const KEY_USER: &str = "user";
pub const KEY_TOKEN: &str = "token";
pub const KEY_USER_NAME: &str = "userName";
pub const KEY_USER_EMAIL: &str = "userEmail";
pub const KEY_ROLE: &str = "role";
pub const KEY_PROFILE_IMAGE: &str = "userProfileImage";

const ALL_KEYS: [&str; 6] = [
    KEY_USER,
    KEY_TOKEN,
    KEY_USER_NAME,
    KEY_USER_EMAIL,
    KEY_ROLE,
    KEY_PROFILE_IMAGE,
];

/// Decision a protected route takes before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteGuard {
    /// Restore has not run yet. Render nothing, never a premature redirect.
    Pending,
    /// No session. Redirect to the public entry route.
    SignedOut,
    SignedIn(User),
}

/// Single source of truth for "who is logged in". All session mutations go
/// through `restore`, `login`, `signup` and `logout`.
pub struct SessionManager {
    api: Arc<dyn PlatformApi>,
    store: Arc<dyn SessionStore>,
    user: RwLock<Option<User>>,
    restored: AtomicBool,
}

impl SessionManager {
    pub fn new(api: Arc<dyn PlatformApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            user: RwLock::new(None),
            restored: AtomicBool::new(false),
        }
    }

    /// Restores the session from durable storage. Runs synchronously at
    /// startup, before any protected view consults `guard`. The stored user
    /// and token are only honored together; if either is missing or the user
    /// record fails to parse, every session key is cleared.
    pub fn restore(&self) {
        let stored_user = self.store.get(KEY_USER);
        let token = self.store.get(KEY_TOKEN);

        let user = match (stored_user, token) {
            (Some(user_json), Some(_)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("stored user record is unreadable, clearing session: {}", e);
                    None
                }
            },
            _ => None,
        };

        if user.is_none() {
            self.clear_store();
        }

        if let Ok(mut slot) = self.user.write() {
            *slot = user;
        }
        self.restored.store(true, Ordering::SeqCst);
    }

    /// Authenticates against the backend. Returns `true` on success; every
    /// failure mode (rejection, transport, malformed payload) returns `false`
    /// without surfacing an error to the caller. Retrying is a manual user
    /// action.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("login failed for {}: {}", email, e);
                return false;
            }
        };

        let user = User {
            id: None,
            name: response.name,
            email: email.to_string(),
            profile_image: response.profile_image,
            role: response.role,
        };

        let user_json = match serde_json::to_string(&user) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize user record: {}", e);
                return false;
            }
        };

        self.store.set(KEY_USER, &user_json);
        self.store.set(KEY_TOKEN, &response.token);
        self.store.set(KEY_USER_NAME, &user.name);
        self.store.set(KEY_USER_EMAIL, &user.email);
        self.store.set(KEY_ROLE, user.role.as_str());
        match &user.profile_image {
            Some(image) => self.store.set(KEY_PROFILE_IMAGE, image),
            None => self.store.remove(KEY_PROFILE_IMAGE),
        }

        info!("logged in as {}", user.email);
        if let Ok(mut slot) = self.user.write() {
            *slot = Some(user);
        }
        true
    }

    /// Registers a new account. Success only signals creation; the caller
    /// must invoke `login` separately to establish a session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        profile_image: Option<String>,
    ) -> bool {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            profile_image,
        };

        match self.api.signup(&request).await {
            Ok(response) => {
                info!("signup for {}: {}", email, response.message);
                true
            }
            Err(e) => {
                warn!("signup failed for {}: {}", email, e);
                false
            }
        }
    }

    /// Clears the in-memory user and every session key. Safe to call when
    /// already logged out.
    pub fn logout(&self) {
        if let Ok(mut slot) = self.user.write() {
            *slot = None;
        }
        self.clear_store();
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().ok().and_then(|slot| slot.clone())
    }

    pub fn is_teacher(&self) -> bool {
        self.current_user().map(|u| u.is_teacher()).unwrap_or(false)
    }

    pub fn guard(&self) -> RouteGuard {
        if !self.restored.load(Ordering::SeqCst) {
            return RouteGuard::Pending;
        }
        match self.current_user() {
            Some(user) => RouteGuard::SignedIn(user),
            None => RouteGuard::SignedOut,
        }
    }

    fn clear_store(&self) {
        for key in ALL_KEYS {
            self.store.remove(key);
        }
    }
}
