use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use wasmhost::abi::AbiProfile;
use wasmhost::host::Host;
use wasmhost::loader;
use wasmhost::sink::OutputSink;

#[derive(Parser, Debug)]
#[command(
    name = "wasmhost",
    about = "Runs a WebAssembly module's `start` export, bridging its console imports."
)]
struct Cli {
    /// Path to the binary module file
    module: PathBuf,

    /// ABI profile the module was compiled against
    #[arg(long, value_enum, default_value_t = AbiProfile::V2)]
    abi: AbiProfile,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout belongs to the module's output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wasmhost=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let image = loader::load(&cli.module)?;
    let host = Host::new(cli.abi)?;
    debug!("running {} (abi {})", cli.module.display(), host.profile());
    host.run(image, OutputSink::stdout())?;

    Ok(())
}
