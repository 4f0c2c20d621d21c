use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user holds within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Host,
    Guest,
}

/// A session participant
///
/// Created on successful admission and never mutated afterwards. A
/// participant who leaves and comes back is admitted as a brand-new user
/// with a fresh id; there is no reconnect identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub joined_at: DateTime<Utc>,
    /// Free-text platform descriptor, advisory only
    pub device_info: String,
    /// Advisory network address, never used for routing
    pub ip: String,
}

impl User {
    /// Creates a new user with a generated id and the current timestamp
    pub fn new(
        name: impl Into<String>,
        role: UserRole,
        device_info: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            role,
            joined_at: Utc::now(),
            device_info: device_info.into(),
            ip: ip.into(),
        }
    }

    pub fn is_host(&self) -> bool {
        self.role == UserRole::Host
    }
}

/// Immutable admission configuration, fixed at session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_users: usize,
    pub enable_2fa: bool,
    /// Present iff `enable_2fa` is set
    pub pin: Option<String>,
}

impl SessionConfig {
    /// Open session without PIN gating
    pub fn open(max_users: usize) -> Self {
        Self {
            max_users,
            enable_2fa: false,
            pin: None,
        }
    }

    /// PIN-gated session
    pub fn with_pin(max_users: usize, pin: impl Into<String>) -> Self {
        Self {
            max_users,
            enable_2fa: true,
            pin: Some(pin.into()),
        }
    }
}

/// The shared room state: identity, configuration, membership, activity flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Room code
    pub id: String,
    /// References a member of `users` while the session is active, except
    /// transiently after the host leaves without ending the session
    pub host_id: String,
    pub created_at: DateTime<Utc>,
    pub config: SessionConfig,
    /// Ordered by join time, unique by id
    pub users: Vec<User>,
    pub is_active: bool,
}

impl Session {
    /// Creates an active session with the host as its sole member
    pub fn new(code: impl Into<String>, host: User, config: SessionConfig) -> Self {
        Self {
            id: code.into(),
            host_id: host.id.clone(),
            created_at: Utc::now(),
            config,
            users: vec![host],
            is_active: true,
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Whether admission would exceed configured capacity
    pub fn is_full(&self) -> bool {
        self.users.len() >= self.config.max_users
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }

    pub fn get_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Appends a user, preserving join order. Duplicate ids are ignored.
    pub fn add_user(&mut self, user: User) {
        if !self.has_user(&user.id) {
            self.users.push(user);
        }
    }

    /// Removes a user by id. Removing an absent id is a no-op.
    pub fn remove_user(&mut self, user_id: &str) {
        self.users.retain(|u| u.id != user_id);
    }

    /// Ids of all current members, in join order
    pub fn user_ids(&self) -> Vec<String> {
        self.users.iter().map(|u| u.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(name: &str, role: UserRole) -> User {
        User::new(name, role, "Linux (Desktop)", "10.0.0.1")
    }

    #[test]
    fn test_new_session_has_host_as_sole_member() {
        let host = test_user("alice", UserRole::Host);
        let host_id = host.id.clone();
        let session = Session::new("1234567890", host, SessionConfig::open(5));

        assert_eq!(session.user_count(), 1);
        assert_eq!(session.host_id, host_id);
        assert!(session.has_user(&host_id));
        assert!(session.is_active);
        assert!(!session.is_full());
    }

    #[test]
    fn test_membership_preserves_join_order() {
        let host = test_user("alice", UserRole::Host);
        let mut session = Session::new("1234567890", host, SessionConfig::open(5));

        let bob = test_user("bob", UserRole::Guest);
        let carol = test_user("carol", UserRole::Guest);
        session.add_user(bob.clone());
        session.add_user(carol.clone());

        let names: Vec<&str> = session.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);

        session.remove_user(&bob.id);
        let names: Vec<&str> = session.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let host = test_user("alice", UserRole::Host);
        let mut session = Session::new("1234567890", host, SessionConfig::open(5));

        let bob = test_user("bob", UserRole::Guest);
        session.add_user(bob.clone());
        session.add_user(bob.clone());

        assert_eq!(session.user_count(), 2);
        assert_eq!(session.get_user(&bob.id).unwrap().name, "bob");
    }

    #[test]
    fn test_is_full_at_capacity() {
        let host = test_user("alice", UserRole::Host);
        let mut session = Session::new("1234567890", host, SessionConfig::open(2));
        assert!(!session.is_full());

        session.add_user(test_user("bob", UserRole::Guest));
        assert!(session.is_full());
    }

    #[test]
    fn test_remove_absent_user_is_noop() {
        let host = test_user("alice", UserRole::Host);
        let mut session = Session::new("1234567890", host, SessionConfig::open(5));

        session.remove_user("not-a-member");
        assert_eq!(session.user_count(), 1);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::Host).unwrap();
        assert_eq!(json, "\"HOST\"");
        let role: UserRole = serde_json::from_str("\"GUEST\"").unwrap();
        assert_eq!(role, UserRole::Guest);
    }
}
