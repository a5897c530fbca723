/*!
Validate command - check network models without generating output
*/

use crate::io::Input;
use crate::settings::Settings;
use canconv_dbc::prelude::*;
use clap::Parser;

/// Check network models without generating output
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Command {
    /// How to encode quotes and backslashes in strings, overriding the configuration
    #[arg(long, value_name = "POLICY")]
    string_policy: Option<StringPolicy>,

    /// The list of model files to validate, '-' to use stdin
    files: Vec<Input>,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        if self.files.is_empty() {
            return Err(anyhow::anyhow!("No files to validate"));
        }

        let generator = Generator::with_string_policy(
            self.string_policy.unwrap_or(settings.string_policy),
        );

        let mut count_failed: usize = 0;
        for input in &self.files {
            let result = input
                .load_network()
                .and_then(|network| generator.validate(&network).map_err(Into::into));
            if let Err(e) = result {
                eprintln!("{}: {e}", input.filepath());
                count_failed = count_failed.saturating_add(1);
            }
        }

        (count_failed == 0)
            .then_some(())
            .ok_or(anyhow::anyhow!("{count_failed} files failed to validate"))
    }
}
