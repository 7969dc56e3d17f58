use clap::Parser;
use provider_gen::cli::{run_cli, Cli};
use provider_gen::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_config()) {
        eprintln!("warning: {err:#}");
    }
    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
