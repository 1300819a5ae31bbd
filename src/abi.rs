//! ABI profiles — the naming contract between the producing compiler and
//! this host.
//!
//! Two revisions of the output ABI exist. A profile names one revision as a
//! single value: which capabilities get linked under `env` and how integers
//! reach the sink. The capability registry is closed and compile-time known;
//! a module importing anything outside the active profile's set fails import
//! resolution inside the engine.

use clap::ValueEnum;

/// Import namespace the module's capability imports live under.
pub const ENV_MODULE: &str = "env";
/// Capability name: append one UTF-16 code unit as a character.
pub const WRITE_CHAR: &str = "write_char";
/// Capability name: append a signed decimal integer.
pub const WRITE_I32: &str = "write_i32";
/// The export the host invokes to run the module.
pub const ENTRY_EXPORT: &str = "start";

/// One host capability a module may import under `env`.
///
/// Both take a single i32 and return nothing; neither can fail from the
/// module's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    WriteChar,
    WriteI32,
}

impl Capability {
    /// Wire name under the `env` namespace.
    pub fn name(self) -> &'static str {
        match self {
            Capability::WriteChar => WRITE_CHAR,
            Capability::WriteI32 => WRITE_I32,
        }
    }
}

/// How `write_i32` serializes to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I32Discipline {
    /// Decimal appended directly, no trailing separator.
    Raw,
    /// Decimal appended with a trailing newline.
    Line,
}

/// A named ABI revision: capability set plus integer output discipline.
///
/// One profile per run; the two disciplines are never mixed within a
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AbiProfile {
    /// First revision: `env.write_i32` only, line-oriented output.
    V1,
    /// Current revision: `env.write_char` and `env.write_i32`, raw stream.
    #[default]
    V2,
}

impl AbiProfile {
    /// The closed set of capabilities this revision links under `env`.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            AbiProfile::V1 => &[Capability::WriteI32],
            AbiProfile::V2 => &[Capability::WriteChar, Capability::WriteI32],
        }
    }

    /// Integer output discipline for this revision.
    pub fn i32_discipline(self) -> I32Discipline {
        match self {
            AbiProfile::V1 => I32Discipline::Line,
            AbiProfile::V2 => I32Discipline::Raw,
        }
    }
}

impl std::fmt::Display for AbiProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbiProfile::V1 => write!(f, "v1"),
            AbiProfile::V2 => write!(f, "v2"),
        }
    }
}
