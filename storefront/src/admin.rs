//! Admin user edit form

use shared::client::AdminUser;

/// Edit form of the admin users table
///
/// Opening the form for a row fills it from the server; closing it clears
/// every field so the next row starts blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUserForm {
    user_id: Option<i64>,
    user: AdminUser,
}

impl AdminUserForm {
    pub fn fill(&mut self, user_id: i64, user: AdminUser) {
        self.user_id = Some(user_id);
        self.user = user;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// User being edited, if the form is filled
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn role(&self) -> &str {
        &self.user.role
    }
}
