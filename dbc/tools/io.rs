/*!
I/O utilities for reading network models and writing DBC output
*/

use canconv_dbc::prelude::*;
use std::borrow::Cow;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

/// Input source - either stdin or a file
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn read_to_string(&self) -> anyhow::Result<String> {
        match self {
            Input::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| anyhow::anyhow!("Failed to read from stdin: {e}"))?;
                Ok(buffer)
            }
            Input::File(path) => std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read from '{}': {e}", path.display())),
        }
    }

    /// Reads a network model in its JSON form
    pub fn load_network(&self) -> anyhow::Result<Network> {
        serde_json::from_str(&self.read_to_string()?)
            .map_err(|e| anyhow::anyhow!("{}: Invalid network model: {e}", self.filepath()))
    }

    pub fn filepath(&self) -> Cow<'_, str> {
        match self {
            Input::Stdin => "stdin".into(),
            Input::File(path) => path.to_string_lossy(),
        }
    }
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::File(PathBuf::from(s)))
        }
    }
}

/// Output destination - either stdout or a file
#[derive(Debug, Clone)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Files are replaced atomically; stdout receives the complete output in one write.
    pub fn write_network(&self, generator: &Generator, network: &Network) -> anyhow::Result<()> {
        match self {
            Output::Stdout => generator
                .write_to(network, std::io::stdout().lock())
                .map_err(|e| anyhow::anyhow!("Failed to generate to stdout: {e}")),
            Output::File(path) => generator
                .write_file(network, path)
                .map_err(|e| anyhow::anyhow!("Failed to generate '{}': {e}", path.display())),
        }
    }
}

impl FromStr for Output {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "-" {
            Ok(Output::Stdout)
        } else {
            Ok(Output::File(PathBuf::from(s)))
        }
    }
}
