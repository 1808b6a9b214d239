//! Ownership checks for aggregates with a single owning user.

use super::{DomainError, ErrorCode, UserId};

/// Implemented by game sessions and schedules.
///
/// ```ignore
/// schedule.check_ownership(&metadata.user_id)?;
/// ```
pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Returns `Forbidden` when `user_id` is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(
                DomainError::new(ErrorCode::Forbidden, "User does not own this resource")
                    .with_detail("owner_id", self.owner_id().to_string())
                    .with_detail("requested_by", user_id.to_string()),
            )
        }
    }
}
