use clap::Parser;
use log::LevelFilter;

use anylint::cli::{Cli, Commands};
use anylint::commands::{run_init, run_lint};

/// Default `warn`, raised by `-v`/`-vv`, silenced by `-q`; `RUST_LOG` wins.
fn init_logger(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Off
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(&cli);

    let exit_code = match &cli.command {
        Commands::Lint(args) => run_lint(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}
