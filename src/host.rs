//! Execution bridge — engine setup, capability linking, entry invocation.
//!
//! The pipeline per run is compile → link → instantiate → call `start`,
//! with a fresh `Store` each time. Capabilities are linked under `env`
//! from the active profile's closed set; the module's own import list
//! decides which of them it actually binds, and the engine's import
//! resolution rejects everything outside the set.

use tracing::debug;
use wasmtime::{Caller, Config, Engine, Instance, Linker, Module, Store, Val};

use crate::abi::{AbiProfile, Capability, I32Discipline, ENTRY_EXPORT, ENV_MODULE};
use crate::error::HostError;
use crate::loader::ModuleImage;
use crate::sink::OutputSink;

/// Store data reachable from capability closures during a run.
struct HostState {
    sink: OutputSink,
    profile: AbiProfile,
}

/// The host runtime: one engine plus one ABI profile, reusable across runs.
pub struct Host {
    engine: Engine,
    profile: AbiProfile,
}

impl Host {
    /// Create a host for the given ABI profile.
    ///
    /// The producing compiler emits GC types, typed function references and
    /// tail calls, so those proposals are enabled explicitly.
    pub fn new(profile: AbiProfile) -> Result<Self, HostError> {
        let mut config = Config::new();
        config.wasm_function_references(true);
        config.wasm_gc(true);
        config.wasm_tail_call(true);
        let engine =
            Engine::new(&config).map_err(|e| HostError::EngineCreation(e.to_string()))?;
        Ok(Self { engine, profile })
    }

    /// The ABI profile this host links against.
    pub fn profile(&self) -> AbiProfile {
        self.profile
    }

    /// Run a module image to completion: compile it, instantiate it against
    /// the profile's capabilities, invoke `start` once, discard its results.
    ///
    /// Consumes the image; the backing bytes are released after compilation
    /// whether or not the rest succeeds. Everything the module emits goes
    /// through `sink` in call order.
    pub fn run(&self, image: ModuleImage, sink: OutputSink) -> Result<(), HostError> {
        // Strictly the binary encoding; a text-format file is not a module.
        let module = Module::from_binary(&self.engine, image.bytes())
            .map_err(|e| HostError::Compilation(e.to_string()))?;
        debug!("module compiled ({} bytes)", image.len());
        drop(image);

        let mut store = Store::new(
            &self.engine,
            HostState {
                sink,
                profile: self.profile,
            },
        );

        let mut linker = Linker::new(&self.engine);
        link_capabilities(&mut linker, self.profile)?;

        let instance = linker
            .instantiate(&mut store, &module)
            .map_err(|e| HostError::Instantiation(e.to_string()))?;
        debug!("module instantiated (abi {})", self.profile);

        invoke_start(&mut store, &instance)
    }
}

/// Define the profile's capabilities on the linker under `env`.
fn link_capabilities(
    linker: &mut Linker<HostState>,
    profile: AbiProfile,
) -> Result<(), HostError> {
    for cap in profile.capabilities() {
        match cap {
            Capability::WriteChar => linker.func_wrap(
                ENV_MODULE,
                cap.name(),
                |mut caller: Caller<'_, HostState>, code: i32| {
                    let c = char_from_code_unit(code);
                    caller.data_mut().sink.put_char(c);
                },
            ),
            Capability::WriteI32 => linker.func_wrap(
                ENV_MODULE,
                cap.name(),
                |mut caller: Caller<'_, HostState>, code: i32| {
                    let state = caller.data_mut();
                    match state.profile.i32_discipline() {
                        I32Discipline::Raw => state.sink.put_str(&code.to_string()),
                        I32Discipline::Line => state.sink.put_line(&code.to_string()),
                    }
                },
            ),
        }
        .map_err(|e| HostError::Instantiation(format!("capability link failed: {e}")))?;
    }
    Ok(())
}

/// Coerce an i32 into the character the module asked for.
///
/// Only the low 16 bits count as the code unit — no validation beyond that.
/// A value in the surrogate range cannot form a `char` and comes out as
/// U+FFFD, matching a lossy decode of a lone surrogate.
fn char_from_code_unit(code: i32) -> char {
    char::from_u32(code as u16 as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Locate the `start` export and call it exactly once with no arguments.
///
/// Results declared by the function are discarded — the producer's current
/// codegen has `start` return an i32 nobody consumes. A missing export, a
/// non-function export and a parameterized signature are all the same
/// condition: there is nothing the host can invoke.
fn invoke_start(store: &mut Store<HostState>, instance: &Instance) -> Result<(), HostError> {
    let func = match instance.get_export(&mut *store, ENTRY_EXPORT) {
        None => {
            return Err(HostError::EntryPointMissing(format!(
                "module exports no '{ENTRY_EXPORT}' function"
            )))
        }
        Some(ext) => ext.into_func().ok_or_else(|| {
            HostError::EntryPointMissing(format!("export '{ENTRY_EXPORT}' is not a function"))
        })?,
    };

    let ty = func.ty(&mut *store);
    let params = ty.params().len();
    if params != 0 {
        return Err(HostError::EntryPointMissing(format!(
            "'{ENTRY_EXPORT}' takes {params} parameter(s), expected none"
        )));
    }

    let mut results: Vec<Val> = ty.results().map(|_| Val::I32(0)).collect();
    debug!("invoking '{ENTRY_EXPORT}'");
    // The trap reason lives in the error's source chain, not its top line.
    func.call(&mut *store, &[], &mut results)
        .map_err(|e| HostError::Trap(format!("{e:#}")))?;

    Ok(())
}
