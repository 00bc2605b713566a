//! Hardware access
//!
//! Reads CPUID registers (raw-cpuid on x86) and the operating system's view
//! of the processor (sysinfo).

pub mod cpu;
pub mod cpuid;

pub use cpu::CpuInfo;
pub use cpuid::{CpuidReader, HardwareCpuid, Registers, SIGNATURE_LEAF};
