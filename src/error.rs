//! Error types for the host runtime.
//!
//! Every condition here is fatal: no retries, no fallback stubs. Engine
//! diagnostics (compilation, instantiation, traps) are carried verbatim so
//! the process boundary reports exactly what wasmtime said.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("engine creation failed: {0}")]
    EngineCreation(String),

    #[error("module not found: {}", .0.display())]
    ModuleNotFound(PathBuf),

    #[error("failed to read module {}: {}", .path.display(), .source)]
    ModuleRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("module compilation failed: {0}")]
    Compilation(String),

    #[error("instantiation failed: {0}")]
    Instantiation(String),

    #[error("entry point missing: {0}")]
    EntryPointMissing(String),

    #[error("module trapped: {0}")]
    Trap(String),
}
