use clap::Parser;

use plexhook_server::cli::{Cli, Command, ServeArgs};
use plexhook_server::startup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let mut config = startup::load_config(cli.profile.as_deref());

    match cli.command {
        Some(Command::Check(args)) => {
            let sensors = args.sensors.unwrap_or_else(|| config.sensors.path.clone());
            startup::check(&args.payload, &sensors)?;
        }
        Some(Command::Serve(args)) => {
            args.apply(&mut config);
            startup::serve(config).await?;
        }
        None => {
            ServeArgs::default().apply(&mut config);
            startup::serve(config).await?;
        }
    }

    Ok(())
}
