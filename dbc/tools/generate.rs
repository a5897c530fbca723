/*!
Generate command - render a network model as DBC
*/

use crate::io::{Input, Output};
use crate::settings::Settings;
use canconv_dbc::prelude::*;
use clap::Parser;
use tracing::info;

/// Render a network model as a DBC file
#[derive(Parser, Debug)]
#[command(
    about = "Render a network model as a DBC file",
    long_about = "Read a CAN network model (JSON) and write it in DBC format.\n\n\
                  Output files are replaced atomically: a failed generation never\n\
                  leaves a partially written file behind."
)]
pub struct Command {
    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// How to encode quotes and backslashes in strings, overriding the configuration
    #[arg(long, value_name = "POLICY", help = "String policy: escape, reject")]
    string_policy: Option<StringPolicy>,

    /// Input file (use '-' or omit for stdin)
    input: Option<Input>,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let input = self.input.unwrap_or(Input::Stdin);
        let network = input.load_network()?;

        let generator = Generator::with_string_policy(
            self.string_policy.unwrap_or(settings.string_policy),
        );
        info!(
            input = %input.filepath(),
            messages = network.messages.len(),
            signals = network.signal_count(),
            "Generating DBC"
        );

        self.output
            .unwrap_or(Output::Stdout)
            .write_network(&generator, &network)
    }
}
