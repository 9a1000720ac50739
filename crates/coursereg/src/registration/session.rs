//! The logged-in user.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::user::UserId;

/// What kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Registrar,
    Student,
    Faculty,
}

/// A single login.
///
/// The correlation id is attached to every log line emitted while the
/// session is active so one user's actions can be followed through the logs.
#[derive(Debug, Clone)]
pub struct Session {
    user: UserId,
    role: Role,
    logged_in_at: DateTime<Utc>,
    correlation_id: String,
}

impl Session {
    pub fn new(user: UserId, role: Role) -> Self {
        Self {
            user,
            role,
            logged_in_at: Utc::now(),
            correlation_id: generate_correlation_id(),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

/// Generates a short id from the current time and a random suffix.
fn generate_correlation_id() -> String {
    let timestamp = Utc::now().timestamp_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
