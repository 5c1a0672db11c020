//! Resident set size of the current process.

use std::time::Instant;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// RSS of this process at one instant, tagged with the stage it was taken for.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    pub rss_bytes: u64,
    pub taken_at: Instant,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl MemoryError {
    pub fn code(&self) -> &'static str {
        match self {
            MemoryError::ProcessNotFound { .. } => "MEMORY_PROCESS_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "[{}] Failed to locate process {}", self.code(), pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

impl MemorySnapshot {
    /// Sample the current RSS.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn capture(label: &str) -> Result<Self, MemoryError> {
        let raw_pid = std::process::id();
        let pid = Pid::from_u32(raw_pid);

        // Refresh only this process.
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let process = sys
            .process(pid)
            .ok_or(MemoryError::ProcessNotFound { pid: raw_pid })?;

        Ok(MemorySnapshot {
            rss_bytes: process.memory(),
            taken_at: Instant::now(),
            label: label.to_string(),
        })
    }

    /// RSS growth from `earlier` to `self`, negative when memory was released.
    pub fn delta_since(&self, earlier: &Self) -> i64 {
        signed_delta(earlier.rss_bytes, self.rss_bytes)
    }
}

/// RSS in bytes, or `None` (with a warning) when the platform cannot report it.
pub fn capture_rss_bytes(label: &str) -> Option<u64> {
    match MemorySnapshot::capture(label) {
        Ok(snapshot) => Some(snapshot.rss_bytes),
        Err(err) => {
            tracing::warn!(
                component = "tools",
                operation = "capture_rss",
                status = "warn",
                label,
                error = %err,
                "RSS unavailable"
            );
            None
        }
    }
}

/// Signed difference of two optional readings.
pub fn rss_delta(before: Option<u64>, after: Option<u64>) -> Option<i64> {
    Some(signed_delta(before?, after?))
}

fn signed_delta(before: u64, after: u64) -> i64 {
    if after >= before {
        i64::try_from(after - before).unwrap_or(i64::MAX)
    } else {
        i64::try_from(before - after).map_or(i64::MIN, |shrink| -shrink)
    }
}
