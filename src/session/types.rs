use serde::{Deserialize, Serialize};

use super::models::SessionConfig;
use crate::shared::SyncError;

/// Bounds on configurable session capacity
pub const MIN_USERS: usize = 2;
pub const MAX_USERS: usize = 20;

/// Required length of a security PIN
pub const PIN_LENGTH: usize = 8;

/// Display-name policy: alphanumeric, at least this many characters
const MIN_NAME_LENGTH: usize = 3;

/// Checks a display name against the boundary policy
pub fn validate_display_name(name: &str) -> Result<(), SyncError> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(SyncError::validation(format!(
            "display name must be at least {} characters",
            MIN_NAME_LENGTH
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SyncError::validation(
            "display name must be alphanumeric",
        ));
    }
    Ok(())
}

fn validate_pin(pin: &str) -> Result<(), SyncError> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(SyncError::validation(format!(
            "PIN must be exactly {} digits",
            PIN_LENGTH
        )));
    }
    Ok(())
}

/// Boundary request to create a session
///
/// Validation happens here, before the request reaches the membership
/// service; the service trusts what it is handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub host_name: String,
    pub config: SessionConfig,
}

impl CreateSessionRequest {
    pub fn validate(&self) -> Result<(), SyncError> {
        validate_display_name(&self.host_name)?;

        if self.config.max_users < MIN_USERS || self.config.max_users > MAX_USERS {
            return Err(SyncError::validation(format!(
                "max users must be between {} and {}",
                MIN_USERS, MAX_USERS
            )));
        }

        match (self.config.enable_2fa, &self.config.pin) {
            (true, Some(pin)) => validate_pin(pin),
            (true, None) => Err(SyncError::validation("2FA requires a PIN")),
            (false, Some(_)) => Err(SyncError::validation("PIN set without 2FA")),
            (false, None) => Ok(()),
        }
    }
}

/// Boundary request to join a session by code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSessionRequest {
    pub code: String,
    pub name: String,
    pub pin: Option<String>,
}

impl JoinSessionRequest {
    pub fn validate(&self) -> Result<(), SyncError> {
        validate_display_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice")]
    #[case("Bob42")]
    #[case("abc")]
    fn test_valid_display_names(#[case] name: &str) {
        assert!(validate_display_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("ab")]
    #[case("has space")]
    #[case("dash-ed")]
    #[case("émile")]
    fn test_invalid_display_names(#[case] name: &str) {
        assert!(matches!(
            validate_display_name(name),
            Err(SyncError::Validation(_))
        ));
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(20)]
    fn test_create_request_accepts_capacity_in_bounds(#[case] max_users: usize) {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig::open(max_users),
        };
        assert!(request.validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(21)]
    fn test_create_request_rejects_capacity_out_of_bounds(#[case] max_users: usize) {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig::open(max_users),
        };
        assert!(matches!(
            request.validate(),
            Err(SyncError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_with_valid_pin() {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig::with_pin(5, "12345678"),
        };
        assert!(request.validate().is_ok());
    }

    #[rstest]
    #[case("1234567")]
    #[case("123456789")]
    #[case("12a45678")]
    #[case("")]
    fn test_create_request_rejects_malformed_pin(#[case] pin: &str) {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig::with_pin(5, pin),
        };
        assert!(matches!(
            request.validate(),
            Err(SyncError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_rejects_pin_without_2fa() {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig {
                max_users: 5,
                enable_2fa: false,
                pin: Some("12345678".to_string()),
            },
        };
        assert!(matches!(
            request.validate(),
            Err(SyncError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_rejects_2fa_without_pin() {
        let request = CreateSessionRequest {
            host_name: "alice".to_string(),
            config: SessionConfig {
                max_users: 5,
                enable_2fa: true,
                pin: None,
            },
        };
        assert!(matches!(
            request.validate(),
            Err(SyncError::Validation(_))
        ));
    }

    #[test]
    fn test_join_request_validates_name_only() {
        let request = JoinSessionRequest {
            code: "1234567890".to_string(),
            name: "bob".to_string(),
            pin: None,
        };
        assert!(request.validate().is_ok());

        let request = JoinSessionRequest {
            code: "1234567890".to_string(),
            name: "x".to_string(),
            pin: None,
        };
        assert!(request.validate().is_err());
    }
}
