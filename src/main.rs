use anyhow::Context;
use clap::Parser;
use smvtodo::app::App;
use smvtodo::config::{Cli, Config};
use smvtodo::db::Database;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::from(Cli::parse());

    // Logs go to stderr; stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.db_path)?;
    println!("Connection has been created");
    println!();

    let stdin = io::stdin();
    let mut app = App::new(db, stdin.lock(), io::stdout().lock());
    app.run().context("todo session aborted")?;
    app.finish().context("failed to close the database")?;
    Ok(())
}
