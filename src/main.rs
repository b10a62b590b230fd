use clap::Parser;
use quantmom::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
