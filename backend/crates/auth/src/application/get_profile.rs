//! Get Profile Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::profile::Profile;
use crate::domain::repository::ProfileRepository;
use crate::error::{AuthError, AuthResult};

/// Get profile use case
pub struct GetProfileUseCase<P>
where
    P: ProfileRepository,
{
    profiles: Arc<P>,
}

impl<P> GetProfileUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<Profile> {
        self.profiles
            .find_by_id(user_id)
            .await
            .map_err(AuthError::into_profile_fetch)?
            .ok_or(AuthError::ProfileNotFound)
    }
}
