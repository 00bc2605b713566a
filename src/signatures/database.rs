//! Known processor signatures
//!
//! Each family lists the fully specified CPUID leaf 1 signatures (stepping
//! included) that identify it. A signature belongs to at most one family.

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::Signature;

/// A marketing name and the signatures that identify it
#[derive(Debug, Clone, Copy)]
pub struct ProcessorFamily {
    /// Display name (e.g., "Raptor Lake")
    pub name: &'static str,
    /// Normalized signatures, see [`Signature::from_eax`]
    pub signatures: &'static [&'static str],
}

/// Lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown CPUID signature {0}")]
    UnknownSignature(String),
}

/// Database of known processor signatures
pub static KNOWN_PROCESSORS: &[ProcessorFamily] = &[
    // ============ AMD ============
    ProcessorFamily {
        name: "AMD Lisbon",
        signatures: &["0x100f81"],
    },
    ProcessorFamily {
        name: "AMD Magny-Cours",
        signatures: &["0x100f91"],
    },
    ProcessorFamily {
        name: "AMD EPYC",
        signatures: &["0x800f12"],
    },
    ProcessorFamily {
        name: "AMD Ryzen",
        signatures: &["0x800f11", "0x810f81"],
    },
    ProcessorFamily {
        name: "AMD Rome",
        signatures: &["0x830f10"],
    },
    ProcessorFamily {
        name: "AMD Milan",
        signatures: &["0xa00f11"],
    },
    ProcessorFamily {
        name: "AMD Milan-X",
        signatures: &["0xa00f12"],
    },
    ProcessorFamily {
        name: "AMD Genoa",
        signatures: &["0xa10f11"],
    },
    ProcessorFamily {
        name: "AMD Genoa-X",
        signatures: &["0xa10f12"],
    },
    ProcessorFamily {
        name: "AMD Bergamo",
        signatures: &["0xaa0f01"],
    },
    ProcessorFamily {
        name: "AMD Siena SP6",
        signatures: &["0xaa0f02"],
    },
    ProcessorFamily {
        name: "AMD Turin",
        signatures: &["0xb00f21"],
    },
    ProcessorFamily {
        name: "AMD Turin Dense",
        signatures: &["0xb10f10"],
    },
    // ============ Hygon ============
    ProcessorFamily {
        name: "Hygon Dhyana",
        signatures: &["0x900f11"],
    },
    ProcessorFamily {
        name: "Hygon Dhyana Plus",
        signatures: &["0x900f22"],
    },
    ProcessorFamily {
        name: "Hygon C86-4G 7490",
        signatures: &["0x900f41"],
    },
    // ============ Intel client ============
    ProcessorFamily {
        name: "Penryn",
        signatures: &["0x1067a"],
    },
    ProcessorFamily {
        name: "Pineview",
        signatures: &["0x106ca"],
    },
    ProcessorFamily {
        name: "Nehalem",
        signatures: &["0x106a5", "0x106e5", "0x206e6"],
    },
    ProcessorFamily {
        name: "Westmere",
        signatures: &["0x20655", "0x206c2", "0x206f2"],
    },
    ProcessorFamily {
        name: "Sandy Bridge",
        signatures: &["0x206a7", "0x206d6", "0x206d7"],
    },
    ProcessorFamily {
        name: "Ivy Bridge",
        signatures: &["0x306a9", "0x306e4", "0x306e7"],
    },
    ProcessorFamily {
        name: "Haswell",
        signatures: &["0x306c3", "0x306f2", "0x306f4", "0x40651", "0x40661"],
    },
    ProcessorFamily {
        name: "Broadwell",
        signatures: &["0x306d4", "0x40671", "0x406f1", "0x50663", "0x50664"],
    },
    ProcessorFamily {
        name: "Skylake",
        signatures: &["0x406e3", "0x506e3", "0x50654"],
    },
    ProcessorFamily {
        name: "Amber Lake",
        signatures: &["0x806e9"],
    },
    ProcessorFamily {
        name: "Kaby Lake",
        signatures: &["0x906e9"],
    },
    ProcessorFamily {
        name: "Coffee Lake",
        signatures: &["0x806ea", "0x906ea", "0x906eb", "0x906ec", "0x906ed"],
    },
    ProcessorFamily {
        name: "Whiskey Lake",
        signatures: &["0x806eb"],
    },
    ProcessorFamily {
        name: "Comet Lake",
        signatures: &["0x806ec", "0xa0652", "0xa0653", "0xa0655", "0xa0660", "0xa0661"],
    },
    ProcessorFamily {
        name: "Canon Lake",
        signatures: &["0x60663"],
    },
    ProcessorFamily {
        name: "Ice Lake",
        signatures: &["0x706e5", "0x606a6", "0x606c1"],
    },
    ProcessorFamily {
        name: "Tiger Lake",
        signatures: &["0x806c1", "0x806c2", "0x806d1"],
    },
    ProcessorFamily {
        name: "Rocket Lake",
        signatures: &["0xa0671"],
    },
    ProcessorFamily {
        name: "Alder Lake",
        signatures: &["0x90672", "0x90675", "0x906a3", "0x906a4"],
    },
    ProcessorFamily {
        name: "Raptor Lake",
        signatures: &["0xb0671", "0xb06a2", "0xb06a3", "0xb06f2", "0xb06f5"],
    },
    ProcessorFamily {
        name: "Meteor Lake",
        signatures: &["0xa06a4"],
    },
    ProcessorFamily {
        name: "Lunar Lake",
        signatures: &["0xb06d1"],
    },
    ProcessorFamily {
        name: "Arrow Lake",
        signatures: &["0xc0662"],
    },
    // ============ Intel Atom ============
    ProcessorFamily {
        name: "Apollo Lake",
        signatures: &["0x506c9"],
    },
    ProcessorFamily {
        name: "Denverton",
        signatures: &["0x506f1"],
    },
    ProcessorFamily {
        name: "Gemini Lake",
        signatures: &["0x706a1", "0x706a8"],
    },
    ProcessorFamily {
        name: "Snow Ridge",
        signatures: &["0x80665"],
    },
    ProcessorFamily {
        name: "Elkhart Lake",
        signatures: &["0x90661"],
    },
    ProcessorFamily {
        name: "Jasper Lake",
        signatures: &["0x906c0"],
    },
    // ============ Intel server ============
    ProcessorFamily {
        name: "Knights Landing",
        signatures: &["0x50671"],
    },
    ProcessorFamily {
        name: "Knights Mill",
        signatures: &["0x80650"],
    },
    ProcessorFamily {
        name: "Cascade Lake",
        signatures: &["0x50656", "0x50657"],
    },
    ProcessorFamily {
        name: "Cooper Lake",
        signatures: &["0x5065a", "0x5065b"],
    },
    ProcessorFamily {
        name: "Sapphire Rapids",
        signatures: &["0x806f3", "0x806f4", "0x806f5", "0x806f6", "0x806f7", "0x806f8"],
    },
    ProcessorFamily {
        name: "Emerald Rapids",
        signatures: &["0xc06f2"],
    },
    ProcessorFamily {
        name: "Granite Rapids",
        signatures: &["0xa06d1"],
    },
    ProcessorFamily {
        name: "Sierra Forest",
        signatures: &["0xa06f3"],
    },
];

/// Resolve a normalized signature against the built-in table.
///
/// The match is an exact string comparison, so "0x900F22" or "0x00900f22"
/// are unknown even though they denote a listed value.
pub fn resolve(signature: &str) -> Result<&'static str, LookupError> {
    KNOWN_PROCESSORS
        .iter()
        .find(|family| family.signatures.iter().any(|known| *known == signature))
        .map(|family| family.name)
        .ok_or_else(|| LookupError::UnknownSignature(signature.to_string()))
}

/// Built-in table plus entries supplied through the config file.
///
/// Built once at start-up. Built-in names always take precedence.
#[derive(Debug, Default)]
pub struct SignatureResolver {
    extra: HashMap<String, String>,
}

impl SignatureResolver {
    /// Resolver over the built-in table only
    pub fn new() -> Self {
        Self::default()
    }

    /// Add user entries keyed by (possibly unnormalized) signatures.
    /// Keys that fail to parse or shadow a built-in signature are skipped.
    pub fn with_extra_signatures<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut extra = HashMap::new();

        for (key, name) in entries {
            let signature = match key.parse::<Signature>() {
                Ok(signature) => signature,
                Err(err) => {
                    warn!("Ignoring configured signature: {err}");
                    continue;
                }
            };

            if let Ok(builtin) = resolve(signature.as_str()) {
                warn!(
                    "Ignoring configured name '{name}' for {signature}: already known as '{builtin}'"
                );
                continue;
            }

            debug!("Registered configured signature {signature} as '{name}'");
            extra.insert(signature.as_str().to_string(), name.clone());
        }

        SignatureResolver { extra }
    }

    /// Resolve a normalized signature, see [`resolve`]
    pub fn resolve(&self, signature: &str) -> Result<&str, LookupError> {
        match resolve(signature) {
            Ok(name) => Ok(name),
            Err(err) => self.extra.get(signature).map(String::as_str).ok_or(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_listed_signature_resolves_to_its_family() {
        for family in KNOWN_PROCESSORS {
            for signature in family.signatures {
                assert_eq!(resolve(signature), Ok(family.name), "{signature}");
            }
        }
    }

    #[test]
    fn signatures_are_unique_and_normalized() {
        let mut seen = HashSet::new();
        for family in KNOWN_PROCESSORS {
            assert!(!family.signatures.is_empty(), "{} has no signatures", family.name);
            for signature in family.signatures {
                assert!(seen.insert(*signature), "{signature} listed twice");
                let normalized: Signature = signature.parse().expect("valid hex");
                assert_eq!(normalized.as_str(), *signature);
            }
        }
    }

    #[test]
    fn known_hygon_parts() {
        assert_eq!(resolve("0x900f22"), Ok("Hygon Dhyana Plus"));
        assert_eq!(resolve("0x900f41"), Ok("Hygon C86-4G 7490"));
    }

    #[test]
    fn unknown_signature_is_an_error() {
        assert_eq!(
            resolve("0xdeadbeef"),
            Err(LookupError::UnknownSignature("0xdeadbeef".to_string()))
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert!(resolve("0x900F22").is_err());
        assert!(resolve("0x00900f22").is_err());
        assert!(resolve("900f22").is_err());
        assert!(resolve("0x900f2").is_err());
    }

    #[test]
    fn extra_signatures_extend_but_never_override() {
        let entries: HashMap<String, String> = [
            ("0X12345".to_string(), "Lab Prototype".to_string()),
            ("0x900f22".to_string(), "Renamed".to_string()),
            ("not-hex".to_string(), "Broken".to_string()),
        ]
        .into_iter()
        .collect();

        let resolver = SignatureResolver::with_extra_signatures(&entries);
        assert_eq!(resolver.resolve("0x12345"), Ok("Lab Prototype"));
        assert_eq!(resolver.resolve("0x900f22"), Ok("Hygon Dhyana Plus"));
        assert!(resolver.resolve("0xdeadbeef").is_err());
    }

    #[test]
    fn default_resolver_matches_builtin_table() {
        let resolver = SignatureResolver::new();
        assert_eq!(resolver.resolve("0xaa0f02"), Ok("AMD Siena SP6"));
        assert!(resolver.resolve("0x12345").is_err());
    }
}
