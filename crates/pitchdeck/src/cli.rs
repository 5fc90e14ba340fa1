use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::LaunchOptions;
use crate::render::transition::TransitionKind;

#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(author, version, about)]
#[command(long_about = "Present a slide deck with a gated preview.\n\n\
    Viewers who are not signed in see the first few slides; the rest stay\n\
    locked until they sign in.\n\n\
    Examples:\n  \
    pitchdeck deck.yaml                     Launch presentation (fullscreen)\n  \
    pitchdeck deck.yaml --windowed          Launch in a window\n  \
    pitchdeck deck.yaml --max-preview 5     Show five slides before the lock\n  \
    pitchdeck deck.yaml --unlocked          Present the whole deck")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file (YAML) to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Transition preset: fade, slide, zoom or flip
    #[arg(long, global = false)]
    pub transition: Option<TransitionKind>,

    /// Number of slides visible before sign-in
    #[arg(long, global = false, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_preview: Option<u64>,

    /// Start with the full deck unlocked
    #[arg(long, global = false)]
    pub unlocked: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.transition, defaults.max_preview_slides)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            windowed: self.windowed,
            start_slide: self.slide,
            transition: self.transition,
            max_preview_slides: self.max_preview.map(|n| n as usize),
            unlocked: self.unlocked,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let options = self.launch_options();
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, options)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_flags() {
        let cli = Cli::try_parse_from([
            "pitchdeck",
            "deck.yaml",
            "--windowed",
            "--slide",
            "2",
            "--transition",
            "zoom",
            "--max-preview",
            "4",
            "-vv",
        ])
        .unwrap();
        let options = cli.launch_options();
        assert!(options.windowed);
        assert_eq!(options.start_slide, Some(2));
        assert_eq!(options.transition, Some(TransitionKind::Zoom));
        assert_eq!(options.max_preview_slides, Some(4));
        assert!(!options.unlocked);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["pitchdeck", "d.yaml", "--transition", "spin"]).is_err());
        assert!(Cli::try_parse_from(["pitchdeck", "d.yaml", "--max-preview", "0"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["pitchdeck", "config", "set", "defaults.theme", "light"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }
}
