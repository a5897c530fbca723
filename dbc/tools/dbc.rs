/*!
DBC Tools - generate CAN databases from network models

The network model is read as JSON, in the shape produced by the `serde`
feature of `canconv-dbc`.

# Examples

```bash
# Generate a DBC file, replacing it atomically
dbc generate -o powertrain.dbc powertrain.json

# Generate to stdout, refusing strings that would need escaping
dbc generate --string-policy reject < powertrain.json

# Check several models without generating anything
dbc validate body.json chassis.json
```
*/

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

mod generate;
mod io;
mod settings;
mod validate;

/// A CLI tool for generating DBC files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use a custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a network model as a DBC file
    Generate(generate::Command),

    /// Check network models without generating anything
    Validate(validate::Command),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = settings::Settings::load(cli.config.as_deref())?;
    settings::init_logger(&settings, cli.verbose)?;
    info!(
        "{} version {} starting...",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    debug!("{settings:?}");

    match cli.command {
        Commands::Generate(args) => args.exec(&settings),
        Commands::Validate(args) => args.exec(&settings),
    }
}
