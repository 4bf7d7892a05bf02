//! Session identity and the admin gate.
//!
//! Identity lives in an external provider. `AuthGate` mirrors what the
//! provider reports and keeps "admin flag not known yet" apart from "not an
//! admin", so protected screens never render before the check resolves.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use storage::repository::ProfileRepository;

use crate::error::AuthError;

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminFlag {
    Unknown,
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    SignedOut,
    SignedIn { user: User, admin: AdminFlag },
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn { user, .. } => Some(user),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// What the admin surface should do for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    /// Still resolving; render a placeholder, never the protected content.
    Pending,
    Granted,
    RedirectToSignIn,
    RedirectHome,
}

#[must_use]
pub fn admin_access(state: &AuthState) -> AdminAccess {
    match state {
        AuthState::Loading
        | AuthState::SignedIn {
            admin: AdminFlag::Unknown,
            ..
        } => AdminAccess::Pending,
        AuthState::SignedOut => AdminAccess::RedirectToSignIn,
        AuthState::SignedIn {
            admin: AdminFlag::No,
            ..
        } => AdminAccess::RedirectHome,
        AuthState::SignedIn {
            admin: AdminFlag::Yes,
            ..
        } => AdminAccess::Granted,
    }
}

//
// ─── PROVIDER ──────────────────────────────────────────────────────────────────
//

/// External identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be reached.
    async fn current_user(&self) -> Result<Option<User>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError` if the admin flag cannot be looked up.
    async fn is_administrator(&self, user: &User) -> Result<bool, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError` if the provider rejects the sign-out.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Fixed session with an in-process admin list.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    user: Mutex<Option<User>>,
    admins: HashSet<String>,
}

impl StaticIdentityProvider {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user: User, is_admin: bool) -> Self {
        let admins = if is_admin {
            HashSet::from([user.id.clone()])
        } else {
            HashSet::new()
        };
        Self {
            user: Mutex::new(Some(user)),
            admins,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let guard = self
            .user
            .lock()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn is_administrator(&self, user: &User) -> Result<bool, AuthError> {
        Ok(self.admins.contains(&user.id))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut guard = self
            .user
            .lock()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Session user with the admin flag read from the store's profiles.
pub struct ProfileDirectory {
    user: Mutex<Option<User>>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileDirectory {
    #[must_use]
    pub fn new(user: Option<User>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            user: Mutex::new(user),
            profiles,
        }
    }
}

#[async_trait]
impl IdentityProvider for ProfileDirectory {
    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let guard = self
            .user
            .lock()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn is_administrator(&self, user: &User) -> Result<bool, AuthError> {
        Ok(self.profiles.is_admin(&user.id).await?)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut guard = self
            .user
            .lock()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

//
// ─── GATE ──────────────────────────────────────────────────────────────────────
//

type Listener = Box<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Tracks the session state reported by an `IdentityProvider`.
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<AuthState>,
    listeners: Mutex<Listeners>,
}

impl AuthGate {
    /// Starts in `Loading` until the first `refresh`.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(AuthState::Loading),
            listeners: Mutex::new(Listeners::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a callback run on every state change.
    pub fn on_session_change(
        &self,
        callback: impl Fn(&AuthState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .retain(|(entry, _)| *entry != id);
    }

    fn set_state(&self, next: AuthState) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == next {
                return;
            }
            state.clone_from(&next);
        }
        tracing::debug!(state = ?next, "auth state changed");
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, callback) in &listeners.entries {
            callback(&next);
        }
    }

    /// Ask the provider for the current session and admin flag.
    ///
    /// The signed-in state is published with `AdminFlag::Unknown` before the
    /// admin lookup runs. If that lookup fails the flag stays unknown.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be queried.
    pub async fn refresh(&self) -> Result<AuthState, AuthError> {
        let Some(user) = self.provider.current_user().await? else {
            self.set_state(AuthState::SignedOut);
            return Ok(AuthState::SignedOut);
        };
        self.set_state(AuthState::SignedIn {
            user: user.clone(),
            admin: AdminFlag::Unknown,
        });
        let is_admin = self.provider.is_administrator(&user).await.map_err(|err| {
            tracing::warn!(user = %user.id, error = %err, "admin lookup failed");
            err
        })?;
        let state = AuthState::SignedIn {
            user,
            admin: if is_admin {
                AdminFlag::Yes
            } else {
                AdminFlag::No
            },
        };
        self.set_state(state.clone());
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns `AuthError` if the provider rejects the sign-out.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.set_state(AuthState::SignedOut);
        Ok(())
    }
}
