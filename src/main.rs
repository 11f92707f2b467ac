use clap::Parser;

use ytr_cli::cli::commands::{configure, translate};
use ytr_cli::cli::{Args, Command, exit_code};
use ytr_cli::translation::print_languages;
use ytr_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    ytr_cli::logging::init(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                from: args.from,
                to: args.to,
                endpoint: args.endpoint,
                timeout_secs: args.timeout,
                max_retries: args.retries,
                no_cache: args.no_cache,
                show_spinner: !args.verbose,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
