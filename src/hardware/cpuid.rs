//! CPUID register access
//!
//! The resolver never executes CPUID itself; it goes through [`CpuidReader`]
//! so callers (and tests) decide where register values come from.

use anyhow::Result;

/// CPUID leaf carrying the processor signature in EAX
pub const SIGNATURE_LEAF: u32 = 0x1;

/// Register values returned by one CPUID invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl From<[u32; 4]> for Registers {
    fn from([eax, ebx, ecx, edx]: [u32; 4]) -> Self {
        Registers { eax, ebx, ecx, edx }
    }
}

/// Source of CPUID register values
pub trait CpuidReader {
    /// Execute CPUID for `leaf` (sub-leaf 0)
    fn cpuid(&self, leaf: u32) -> Result<Registers>;
}

/// Reads CPUID from the processor this process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareCpuid;

impl CpuidReader for HardwareCpuid {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn cpuid(&self, leaf: u32) -> Result<Registers> {
        let result = raw_cpuid::cpuid!(leaf);
        Ok(Registers {
            eax: result.eax,
            ebx: result.ebx,
            ecx: result.ecx,
            edx: result.edx,
        })
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    fn cpuid(&self, leaf: u32) -> Result<Registers> {
        anyhow::bail!(
            "CPUID leaf {leaf:#x} is not available on {} processors",
            std::env::consts::ARCH
        )
    }
}
