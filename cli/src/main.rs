use std::io::Write;

use anyhow::Error;

use clap::{ArgAction, Parser, Subcommand};

mod stat;
use stat::Stat;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tools for observation richness statistics.
#[derive(Debug, Parser)]
#[command(name = NAME, version = VERSION, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Disable logging.
    ///
    /// By default, warnings are logged to stderr. Setting this flag turns logging off.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase logging verbosity.
    ///
    /// Once logs progress, twice logs per-sample singletons and doubletons, three times logs
    /// everything.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    pub fn run(self) -> Result<(), Error> {
        let level = if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        match env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[richness {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        log::trace!("Parsed arguments: {self:#?}");

        self.command.run()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Stat(Stat),
}

impl Command {
    fn run(self) -> Result<(), Error> {
        match self {
            Command::Stat(stat) => stat.run(),
        }
    }
}

impl TryFrom<Command> for Stat {
    type Error = Command;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::Stat(stat) => Ok(stat),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    fn try_parse_args(cmd: &str) -> Result<Cli, clap::Error> {
        Parser::try_parse_from(cmd.split_whitespace())
    }

    pub fn try_parse_subcmd<T>(cmd: &str) -> Result<T, clap::Error>
    where
        T: TryFrom<Command>,
        T::Error: std::fmt::Debug,
    {
        try_parse_args(cmd).map(|cli| T::try_from(cli.command).expect("wrong subcommand"))
    }

    pub fn parse_subcmd<T>(cmd: &str) -> T
    where
        T: TryFrom<Command>,
        T::Error: std::fmt::Debug,
    {
        try_parse_subcmd(cmd).expect("failed to parse command")
    }

    #[test]
    fn test_no_subcommand() {
        let result = try_parse_args("richness");

        assert_eq!(
            result.unwrap_err().kind(),
            ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = try_parse_args("richness stat -q -v table.txt");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = try_parse_args("richness -vv stat table.txt").unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
