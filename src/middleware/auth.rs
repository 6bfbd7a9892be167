//! Authentication middleware
//!
//! The bot has a single admin, configured by id. Admin-only handlers and
//! the approval service check the acting user here.

use teloxide::types::User;
use tracing::{debug, warn};
use crate::utils::errors::{StoryBotError, Result};

#[derive(Debug, Clone, Copy)]
pub struct AuthMiddleware {
    admin_id: i64,
}

impl AuthMiddleware {
    pub fn new(admin_id: i64) -> Self {
        Self { admin_id }
    }

    pub fn admin_id(&self) -> i64 {
        self.admin_id
    }

    /// Check if user is the admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        user_id == self.admin_id
    }

    /// Fail with `PermissionDenied` unless the user is the admin
    pub fn check_admin(&self, user_id: i64) -> Result<()> {
        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, "Unauthorized admin access attempt");
            Err(StoryBotError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }

    /// Same as [`check_admin`](Self::check_admin) for a Telegram user
    pub fn check_admin_user(&self, user: &User) -> Result<()> {
        self.check_admin(user.id.0 as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn create_test_user(id: u64) -> User {
        User {
            id: UserId(id),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn test_admin_check() {
        let auth = AuthMiddleware::new(123);

        assert!(auth.is_admin(123));
        assert!(!auth.is_admin(456));
        assert_eq!(auth.admin_id(), 123);
    }

    #[test]
    fn test_admin_auth() {
        let auth = AuthMiddleware::new(123);

        assert!(auth.check_admin_user(&create_test_user(123)).is_ok());
        assert!(matches!(
            auth.check_admin_user(&create_test_user(456)),
            Err(StoryBotError::PermissionDenied(_))
        ));
    }
}
