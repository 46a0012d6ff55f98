//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plexhook_core::Config;

/// Plex webhook receiver driving filter-matched occupancy sensors.
#[derive(Parser, Debug)]
#[command(name = "plexhook", version, about)]
pub struct Cli {
    /// Config profile; keys are looked up as `{PROFILE}_{KEY}` first.
    #[arg(long, global = true, env = "PLEXHOOK_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the webhook server (default).
    Serve(ServeArgs),
    /// Evaluate a saved payload against the sensors and print the trace.
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address (overrides PLEXHOOK_HOST).
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides PLEXHOOK_PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Address shown on the landing page (overrides PLEXHOOK_PUBLIC_ADDRESS).
    #[arg(long)]
    pub public_address: Option<String>,

    /// Sensors file, JSON or YAML (overrides PLEXHOOK_SENSORS).
    #[arg(long)]
    pub sensors: Option<PathBuf>,

    /// Log filter traces at info level.
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding a webhook payload.
    #[arg(long, short)]
    pub payload: PathBuf,

    /// Sensors file, JSON or YAML (overrides PLEXHOOK_SENSORS).
    #[arg(long)]
    pub sensors: Option<PathBuf>,
}

impl ServeArgs {
    /// Fold command-line overrides into the env-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
            if self.public_address.is_none() {
                config.server.public_address = plexhook_core::config::advertised_address(host);
            }
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(address) = &self.public_address {
            config.server.public_address = address.clone();
        }
        if let Some(path) = &self.sensors {
            config.sensors.path = path.clone();
        }
        if self.verbose {
            config.sensors.verbose = true;
        }
    }
}
