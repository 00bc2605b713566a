//! CPU environment probe
//!
//! Collects the details the operating system reports about the processor
//! (brand string, vendor, core counts) using the sysinfo crate. Only used
//! for diagnostic logging next to the CPUID signature.

use anyhow::Result;
use sysinfo::System;

/// CPU information as reported by the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    /// Brand string (e.g., "AMD Ryzen 7 5800X")
    pub name: String,
    /// Vendor id (e.g., "GenuineIntel")
    pub vendor: String,
    /// Number of physical cores (if available)
    pub cores: Option<usize>,
    /// Number of logical threads
    pub threads: usize,
    /// Current frequency of the first logical CPU in MHz
    pub frequency_mhz: u64,
}

impl CpuInfo {
    /// Detect CPU information
    pub fn detect() -> Result<Self> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            anyhow::bail!("No CPU detected");
        }

        let first_cpu = &cpus[0];

        Ok(CpuInfo {
            name: first_cpu.brand().trim().to_string(),
            vendor: first_cpu.vendor_id().to_string(),
            cores: sys.physical_core_count(),
            threads: cpus.len(),
            frequency_mhz: first_cpu.frequency(),
        })
    }

    /// One-line description for log output
    pub fn summary(&self) -> String {
        let name = if self.name.is_empty() {
            "unknown model"
        } else {
            self.name.as_str()
        };
        let cores = self
            .cores
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());

        format!(
            "{name} ({}), {cores} cores / {} threads @ {} MHz",
            self.vendor, self.threads, self.frequency_mhz
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CpuInfo;

    fn sample() -> CpuInfo {
        CpuInfo {
            name: "13th Gen Intel(R) Core(TM) i7-13700K".to_string(),
            vendor: "GenuineIntel".to_string(),
            cores: Some(16),
            threads: 24,
            frequency_mhz: 3400,
        }
    }

    #[test]
    fn summary_lists_brand_vendor_and_counts() {
        assert_eq!(
            sample().summary(),
            "13th Gen Intel(R) Core(TM) i7-13700K (GenuineIntel), 16 cores / 24 threads @ 3400 MHz"
        );
    }

    #[test]
    fn summary_tolerates_missing_fields() {
        let info = CpuInfo {
            name: String::new(),
            cores: None,
            ..sample()
        };
        assert_eq!(
            info.summary(),
            "unknown model (GenuineIntel), ? cores / 24 threads @ 3400 MHz"
        );
    }
}
