use anyhow::Result;
use clap::Parser;

use mtgate::cli::commands::{configure, detect, languages, translate};
use mtgate::cli::{Args, Command, exit_code};
use mtgate::logging;
use mtgate::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> Result<()> {
    args.validate_languages()?;

    let quiet = args.verbose;
    let resolve = args.backend.resolve_options(args.from, args.to);

    match args.command {
        Some(Command::Detect { text }) => detect::run_detect(text, &resolve, quiet).await,
        Some(Command::Languages) => languages::print_languages(&resolve, quiet).await,
        Some(Command::Configure { show, init }) => {
            configure::run_configure(configure::ConfigureAction::from_flags(show, init))
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                resolve,
                show_detected: args.show_detected,
                quiet,
            };
            translate::run_translate(options).await
        }
    }
}
