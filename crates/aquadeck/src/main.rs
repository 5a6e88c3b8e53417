use aquadeck::cli::Cli;
use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    aquadeck::logging::init(cli.log_level());

    if let Err(e) = cli.run() {
        log::error!("{e:#}");
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
