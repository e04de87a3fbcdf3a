//! Environment detection for benchmark runs.

use sysinfo::System;

/// Host information logged at the start of a benchmark run
#[derive(Debug, Clone)]
pub struct EnvironmentInfo {
    pub cpu_model: Option<String>,
    pub cpu_cores_logical: usize,
    pub cpu_cores_physical: Option<usize>,
    pub total_ram_bytes: u64,
    pub os: String,
    pub hostname: Option<String>,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        EnvironmentInfo {
            cpu_model: None,
            cpu_cores_logical: 0,
            cpu_cores_physical: None,
            total_ram_bytes: 0,
            os: std::env::consts::OS.to_string(),
            hostname: None,
        }
    }
}

impl EnvironmentInfo {
    /// Detect environment information from the current system
    pub fn detect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        EnvironmentInfo {
            cpu_model: sys.cpus().first().map(|c| c.brand().to_string()),
            cpu_cores_logical: sys.cpus().len(),
            cpu_cores_physical: sys.physical_core_count(),
            total_ram_bytes: sys.total_memory(),
            os: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            hostname: System::host_name(),
        }
    }

    /// Thread counts that ask for more workers than there are logical cores.
    ///
    /// An undetected core count (zero) never flags anything.
    pub fn oversubscribed(&self, thread_counts: &[usize]) -> Vec<usize> {
        if self.cpu_cores_logical == 0 {
            return Vec::new();
        }
        thread_counts
            .iter()
            .copied()
            .filter(|&n| n > self.cpu_cores_logical)
            .collect()
    }
}
