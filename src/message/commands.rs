use chrono::Local;

use crate::session::User;

/// Expands slash-command input into its computed text
///
/// Runs at the caller boundary before a message is constructed, so the
/// relayed content is already the expanded string. The whole input must be
/// the command (case-insensitive); anything else passes through unchanged.
pub fn expand_command(input: &str, user: &User) -> String {
    match input.to_lowercase().as_str() {
        "/date" => {
            let now = Local::now();
            format!("{} ({})", now.format("%A %B %Y"), now.format("%d/%m/%y"))
        }
        "/myip" => {
            if user.ip.is_empty() {
                "Unknown IP".to_string()
            } else {
                user.ip.clone()
            }
        }
        "/mydevice" => format!("Currently device: {}", user.device_info),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRole;

    fn user() -> User {
        User::new("alice", UserRole::Host, "Linux (Desktop)", "192.168.1.7")
    }

    #[test]
    fn test_date_command_formats_local_date() {
        let expanded = expand_command("/date", &user());
        // "Friday December 2025 (05/12/25)"
        assert!(expanded.contains('('));
        assert!(expanded.ends_with(')'));
        assert!(expanded.contains('/'));
    }

    #[test]
    fn test_myip_command_returns_advisory_ip() {
        assert_eq!(expand_command("/myip", &user()), "192.168.1.7");
    }

    #[test]
    fn test_myip_without_ip_falls_back() {
        let mut u = user();
        u.ip = String::new();
        assert_eq!(expand_command("/myip", &u), "Unknown IP");
    }

    #[test]
    fn test_mydevice_command() {
        assert_eq!(
            expand_command("/mydevice", &user()),
            "Currently device: Linux (Desktop)"
        );
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(expand_command("/MyIP", &user()), "192.168.1.7");
    }

    #[test]
    fn test_ordinary_text_passes_through() {
        assert_eq!(expand_command("hello /date", &user()), "hello /date");
        assert_eq!(expand_command("hi", &user()), "hi");
    }
}
