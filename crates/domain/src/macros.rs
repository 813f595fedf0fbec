//! Macro for implementing Display and FromStr for closed domain enums
//!
//! Categories, shift types and failure kinds all travel as short lowercase
//! strings (storage keys, JSON payloads, log fields). This macro provides a
//! single implementation for both Display and FromStr, with case-insensitive
//! parsing and optional input aliases.
//!
//! # Example
//!
//! ```rust
//! use shiftline_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Lamp {
//!     Green,
//!     Amber,
//! }
//!
//! impl_domain_enum_conversions!(Lamp {
//!     Green => "green" | "ok",
//!     Amber => "amber",
//! });
//!
//! assert_eq!(Lamp::Green.to_string(), "green");
//! assert_eq!("OK".parse::<Lamp>(), Ok(Lamp::Green));
//! ```

/// Implements Display and FromStr traits for closed domain enums
///
/// This macro generates:
/// - Display trait: writes the canonical string of the variant
/// - FromStr trait: parses case-insensitive canonical strings or aliases
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str | $alias...` - Canonical string plus optional aliases
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestPhase {
        Loading,
        Hauling,
        Dumping,
    }

    impl_domain_enum_conversions!(TestPhase {
        Loading => "loading",
        Hauling => "hauling" | "haul" | "travel",
        Dumping => "dumping",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestPhase::Loading.to_string(), "loading");
        assert_eq!(TestPhase::Hauling.to_string(), "hauling");
        assert_eq!(TestPhase::Dumping.to_string(), "dumping");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestPhase::from_str("LOADING").unwrap(), TestPhase::Loading);
        assert_eq!(TestPhase::from_str("DumPing").unwrap(), TestPhase::Dumping);
        assert_eq!(TestPhase::from_str("  hauling ").unwrap(), TestPhase::Hauling);
    }

    #[test]
    fn test_fromstr_aliases() {
        assert_eq!(TestPhase::from_str("haul").unwrap(), TestPhase::Hauling);
        assert_eq!(TestPhase::from_str("Travel").unwrap(), TestPhase::Hauling);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestPhase::from_str("parking");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestPhase: parking"));
        assert!(TestPhase::from_str("").is_err());
    }
}
