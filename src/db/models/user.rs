//! User Model
//!
//! 登录身份与授权单元。Waiter 档案与登录账号分离，见 [`super::waiter`]。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// Staff role — drives the centralized route access policy.
///
/// 字符串比较分散在各处是旧实现的问题，这里统一为类型化枚举。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Waiter,
    Kitchen,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Waiter => "waiter",
            Role::Kitchen => "kitchen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "waiter" => Ok(Role::Waiter),
            "kitchen" => Ok(Role::Kitchen),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Account approval status (self-registered users start as pending)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Approved,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Approved => "approved",
        }
    }
}

/// User model matching the `user` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: i64,
}

/// Create user payload (admin-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Admin-created accounts default to approved
    pub status: Option<UserStatus>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Manager, Role::Waiter, Role::Kitchen] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = User::hash_password("s3cret-pass").unwrap();
        let user = User {
            id: None,
            name: "t".into(),
            email: "t@example.com".into(),
            role: Role::Waiter,
            hash_pass: hash,
            status: UserStatus::Approved,
            created_at: 0,
        };
        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }
}
