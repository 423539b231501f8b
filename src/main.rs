use ascii_lens::cli::{self, Args, Command};
use clap::Parser;

fn main() {
    let args = Args::parse();

    let result = match &args.command {
        Some(Command::Charsets) => {
            cli::list_charsets();
            Ok(())
        }
        Some(Command::Config { action }) => cli::handle_config_action(action, args.config.as_deref()),
        None => cli::run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
