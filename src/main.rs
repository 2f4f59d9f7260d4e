use clap::Parser;
use bbrsi::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
