use std::fs;
use std::path::{Path, PathBuf};
use std::process::{ExitCode, Termination};

use clap::Parser;

const APP_NAME: &str = "askroom";

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Askroom(askroom::Command),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Ask questions, live",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(code) => code,
            Err(err) => {
                eprintln!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        eprintln!("Caused by:");
                    }
                    eprintln!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Askroom(run) => run.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> impl Termination {
    load_xdg_config();
    Cli::parse().run().await
}

/// Set environment variables from the files of the configuration directory.
///
/// Each file is one variable, named like the file, holding the trimmed content.
fn load_xdg_config() {
    let Some(config_dir) = config_dir(std::env::var("XDG_CONFIG_HOME").ok(), std::env::var("HOME").ok()) else {
        return;
    };

    if !config_dir.is_dir() {
        return;
    }

    match read_config(&config_dir) {
        Ok(vars) => {
            for (name, value) in vars {
                std::env::set_var(name, value);
            }
        }
        Err(err) => {
            eprintln!("Warning: unable to read configuration directory {config_dir:?}: {err}");
        }
    }
}

fn config_dir(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        Some(Path::new(&xdg_config_home).join(APP_NAME))
    } else {
        home.map(|home| Path::new(&home).join(".config").join(APP_NAME))
    }
}

fn read_config(dir: &Path) -> std::io::Result<Vec<(String, String)>> {
    let mut vars = Vec::new();
    for entry in dir.read_dir()?.flatten() {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if let Ok(value) = fs::read_to_string(entry.path()) {
            vars.push((name, value.trim().to_string()));
        }
    }
    vars.sort();
    Ok(vars)
}
