//! wasmhost — minimal host runtime for a compiled WebAssembly module.
//!
//! Loads one binary module, links the output capabilities its ABI revision
//! allows under `env`, invokes the exported `start` entry point once, and
//! streams everything the module writes to an output sink. wasmtime does
//! the compiling, validating and executing; this crate owns the ABI
//! contract and the bridge.

pub mod abi;
pub mod error;
pub mod host;
pub mod loader;
pub mod sink;
