use rand::Rng;

/// Trait for generating room codes
pub trait RoomCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Fixed-length numeric room code generator
///
/// Codes are 10 decimal digits drawn uniformly from [10^9, 10^10), wide
/// enough that collision with a still-active session is negligible at the
/// participant counts this system targets. Previously issued codes are not
/// tracked, so a collision is possible but not checked.
pub struct NumericRoomCodeGenerator;

impl NumericRoomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NumericRoomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCodeGenerator for NumericRoomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        rng.random_range(1_000_000_000u64..10_000_000_000u64).to_string()
    }
}

/// Free-text platform descriptor for a newly admitted user
pub fn device_descriptor() -> String {
    match std::env::consts::OS {
        "linux" => "Linux (Desktop)",
        "macos" => "Mac (Desktop)",
        "windows" => "Windows (Desktop)",
        "android" => "Android (Mobile)",
        "ios" => "iPhone (Mobile)",
        _ => "Unknown Device",
    }
    .to_string()
}

/// Advisory, realistic-looking random IPv4 string
///
/// Never used for routing; it exists so `/myip` has something to show.
pub fn mock_ip() -> String {
    let mut rng = rand::rng();
    format!(
        "{}.{}.{}.{}",
        rng.random_range(0..255u16),
        rng.random_range(0..255u16),
        rng.random_range(0..255u16),
        rng.random_range(0..255u16)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_shape() {
        let generator = NumericRoomCodeGenerator::new();
        for _ in 0..50 {
            let code = generator.generate();
            assert_eq!(code.len(), 10);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_room_codes_are_not_constant() {
        let generator = NumericRoomCodeGenerator::new();
        let codes: std::collections::HashSet<String> =
            (0..20).map(|_| generator.generate()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_device_descriptor_is_known_label() {
        let descriptor = device_descriptor();
        assert!(!descriptor.is_empty());
        assert!(descriptor.contains("Desktop") || descriptor.contains("Mobile") || descriptor == "Unknown Device");
    }

    #[test]
    fn test_mock_ip_has_four_octets() {
        let ip = mock_ip();
        let octets: Vec<&str> = ip.split('.').collect();
        assert_eq!(octets.len(), 4);
        for octet in octets {
            octet.parse::<u8>().unwrap();
        }
    }
}
