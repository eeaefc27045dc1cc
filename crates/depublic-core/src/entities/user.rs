//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Admins manage events, categories and tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored role, falling back to `User` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
///
/// The password hash lives in [`UserCredentials`], which is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub address: Option<String>,
    /// Whether the email verification code was confirmed.
    pub verified: bool,
    /// Whether the account is enabled.
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unverified, enabled account.
    #[must_use]
    pub fn new(fullname: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            fullname: fullname.into(),
            email: email.into().to_lowercase(),
            phone: None,
            role,
            address: None,
            verified: false,
            status: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Updates contact details.
    pub fn update_profile(
        &mut self,
        fullname: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    ) {
        if let Some(fullname) = fullname {
            self.fullname = fullname;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        if address.is_some() {
            self.address = address;
        }
        self.updated_at = Utc::now();
    }

    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.updated_at = Utc::now();
    }
}

/// Login material for an account, read straight from the store.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub verified: bool,
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("verified", &self.verified)
            .finish_non_exhaustive()
    }
}
