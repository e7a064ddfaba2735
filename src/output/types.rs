// src/output/types.rs
//! Type definitions for output operations.
//!
//! A page export is first planned as a list of operations, then executed
//! by [`deliver`](super::deliver).

use std::fmt;
use std::path::{Path, PathBuf};

/// A complete output plan for one page.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A single output operation.
#[derive(Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Create a directory (and its parents).
    CreateDirectory { path: PathBuf },
    /// Write a page's text.
    WriteFile { path: PathBuf, content: String },
    /// Write a downloaded asset's bytes.
    WriteAsset { path: PathBuf, bytes: Vec<u8> },
}

impl DeliveryTarget {
    pub fn path(&self) -> &Path {
        match self {
            DeliveryTarget::CreateDirectory { path }
            | DeliveryTarget::WriteFile { path, .. }
            | DeliveryTarget::WriteAsset { path, .. } => path,
        }
    }
}

// Asset bytes are left out of debug output.
impl fmt::Debug for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::CreateDirectory { path } => {
                f.debug_struct("CreateDirectory").field("path", path).finish()
            }
            DeliveryTarget::WriteFile { path, content } => f
                .debug_struct("WriteFile")
                .field("path", path)
                .field("len", &content.len())
                .finish(),
            DeliveryTarget::WriteAsset { path, bytes } => f
                .debug_struct("WriteAsset")
                .field("path", path)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One `path: error` line per failed operation.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("{}: {}", f.path.display(), f.error))
            .collect()
    }
}

/// A successfully completed operation.
#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub path: PathBuf,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

/// A failed operation with error information.
#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub path: PathBuf,
    pub error: String,
}

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}
