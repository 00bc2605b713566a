//! Processor signatures
//!
//! A signature is the EAX value returned by CPUID leaf 1 (stepping, model,
//! family and their extended fields), rendered as lowercase hex with a `0x`
//! prefix and no zero padding. The same rendering is used for the lookup
//! table keys, so lookups are plain string comparisons.

pub mod database;

pub use database::{resolve, LookupError, SignatureResolver};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Normalized CPUID signature (e.g. "0x900f22")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Build a signature from the raw EAX register of CPUID leaf 1
    pub fn from_eax(eax: u32) -> Self {
        Signature(format!("{eax:#x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors raised while parsing a user-written signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSignatureError {
    #[error("Signature is empty")]
    Empty,

    #[error("Signature '{0}' is not a hexadecimal number")]
    InvalidHex(String),

    #[error("Signature '{0}' does not fit in 32 bits")]
    Overflow(String),
}

impl FromStr for Signature {
    type Err = ParseSignatureError;

    /// Accepts any hex case, with or without a `0x`/`0X` prefix, and
    /// re-renders the value in normalized form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(ParseSignatureError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseSignatureError::InvalidHex(trimmed.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(Signature::from_eax)
            .map_err(|_| ParseSignatureError::Overflow(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_eax_is_lowercase_without_padding() {
        assert_eq!(Signature::from_eax(0x900F22).as_str(), "0x900f22");
        assert_eq!(Signature::from_eax(0xB0671).as_str(), "0xb0671");
        assert_eq!(Signature::from_eax(0).as_str(), "0x0");
        assert_eq!(Signature::from_eax(u32::MAX).as_str(), "0xffffffff");
    }

    #[test]
    fn parse_normalizes_case_and_prefix() {
        let expected = Signature::from_eax(0x900F22);
        assert_eq!("0X900F22".parse::<Signature>(), Ok(expected.clone()));
        assert_eq!("900f22".parse::<Signature>(), Ok(expected.clone()));
        assert_eq!(" 0x00900f22 ".parse::<Signature>(), Ok(expected));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!("".parse::<Signature>(), Err(ParseSignatureError::Empty));
        assert_eq!("0x".parse::<Signature>(), Err(ParseSignatureError::Empty));
        assert!(matches!(
            "0xgg12".parse::<Signature>(),
            Err(ParseSignatureError::InvalidHex(_))
        ));
        assert!(matches!(
            "-0x12".parse::<Signature>(),
            Err(ParseSignatureError::InvalidHex(_))
        ));
        assert!(matches!(
            "0x100000000".parse::<Signature>(),
            Err(ParseSignatureError::Overflow(_))
        ));
    }

    #[test]
    fn display_matches_as_str() {
        let signature = Signature::from_eax(0xAA0F02);
        assert_eq!(signature.to_string(), signature.as_str());
    }
}
