//! In-process stand-ins for the upstream platform

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use kernel::id::UserId;
use platform::upstream::UpstreamError;

use crate::domain::entity::profile::Profile;
use crate::domain::repository::{IdentityProvider, ProfileRepository, Registration};
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::{AuthError, AuthResult};

/// Identity provider and profile table backed by hash maps
pub(crate) struct FakeUpstream {
    accounts: Mutex<HashMap<String, (String, UserId)>>,
    profiles: Mutex<HashMap<UserId, Profile>>,
    profiles_fail: AtomicBool,
    profile_on_signup: AtomicBool,
    signup_rejection: Mutex<Option<String>>,
    reset_fails: AtomicBool,
    reset_requests: Mutex<Vec<String>>,
    identity_calls: AtomicUsize,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            profiles_fail: AtomicBool::new(false),
            profile_on_signup: AtomicBool::new(true),
            signup_rejection: Mutex::new(None),
            reset_fails: AtomicBool::new(false),
            reset_requests: Mutex::new(Vec::new()),
            identity_calls: AtomicUsize::new(0),
        }
    }

    /// Register an account with a matching profile row
    pub fn add_account(&self, email: &str, password: &str, name: &str) -> UserId {
        let id = UserId::new();
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_lowercase(), (password.to_owned(), id));
        self.profiles.lock().unwrap().insert(
            id,
            Profile {
                id,
                email: email.to_lowercase(),
                name: name.to_owned(),
                is_admin: false,
            },
        );
        id
    }

    pub fn remove_profile(&self, id: &UserId) {
        self.profiles.lock().unwrap().remove(id);
    }

    pub fn fail_profiles(&self) {
        self.profiles_fail.store(true, Ordering::SeqCst);
    }

    /// Signups succeed upstream but no profile row appears
    pub fn skip_profile_on_signup(&self) {
        self.profile_on_signup.store(false, Ordering::SeqCst);
    }

    pub fn reject_signups(&self, body: &str) {
        *self.signup_rejection.lock().unwrap() = Some(body.to_owned());
    }

    pub fn fail_resets(&self) {
        self.reset_fails.store(true, Ordering::SeqCst);
    }

    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().unwrap().clone()
    }

    /// Number of credential exchange and signup calls
    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for FakeUpstream {
    async fn exchange_credentials(&self, email: &Email, password: &Password) -> AuthResult<UserId> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        match self.accounts.lock().unwrap().get(email.as_str()) {
            Some((stored, id)) if stored == password.expose() => Ok(*id),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn register(&self, registration: &Registration) -> AuthResult<UserId> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(body) = self.signup_rejection.lock().unwrap().clone() {
            return Err(AuthError::RegistrationRejected(body));
        }

        let email = registration.email.as_str().to_owned();
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&email) {
            return Err(AuthError::RegistrationRejected(
                r#"{"msg":"User already registered"}"#.into(),
            ));
        }

        let id = UserId::new();
        accounts.insert(
            email.clone(),
            (registration.password.expose().to_owned(), id),
        );
        if self.profile_on_signup.load(Ordering::SeqCst) {
            self.profiles.lock().unwrap().insert(
                id,
                Profile {
                    id,
                    email,
                    name: registration.full_name.as_str().to_owned(),
                    is_admin: false,
                },
            );
        }
        Ok(id)
    }

    async fn request_password_reset(&self, email: &Email) -> AuthResult<()> {
        self.reset_requests
            .lock()
            .unwrap()
            .push(email.as_str().to_owned());
        if self.reset_fails.load(Ordering::SeqCst) {
            return Err(AuthError::Upstream(UpstreamError::Status {
                status: 500,
                body: "smtp down".into(),
            }));
        }
        Ok(())
    }
}

impl ProfileRepository for FakeUpstream {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<Profile>> {
        if self.profiles_fail.load(Ordering::SeqCst) {
            return Err(AuthError::Upstream(UpstreamError::Timeout));
        }
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }
}
