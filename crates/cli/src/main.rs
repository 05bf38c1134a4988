use clap::Parser;
use cmr_core::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod shell;

use config::ShellConfig;
use shell::Shell;

#[derive(Parser)]
#[command(name = "cmr")]
#[command(about = "Clinic meeting registry interactive shell")]
struct Cli {
    /// Doctor password (overrides CMR_DOCTOR_PASSWORD)
    #[arg(long)]
    doctor_password: Option<String>,
    /// Admin password (overrides CMR_ADMIN_PASSWORD)
    #[arg(long)]
    admin_password: Option<String>,
}

/// Main entry point for the clinic meeting registry shell.
///
/// Builds an empty in-memory registry and hands it to the interactive menu
/// loop on stdin/stdout. All state is volatile and scoped to one run.
///
/// # Environment Variables
/// - `CMR_DOCTOR_PASSWORD`: doctor flow password (default: "doctor")
/// - `CMR_ADMIN_PASSWORD`: admin flow password (default: "admin")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("cmr=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ShellConfig::resolve(cli.doctor_password, cli.admin_password);
    tracing::info!("starting clinic registry shell");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(Registry::new(), config, stdin.lock(), stdout.lock());
    shell.run()?;
    Ok(())
}
