//! `reviewtag` 바이너리 진입점.

use reviewtag::interface::cli::{AppComposition, Cli, CliAction, render_outcome};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    match action {
        CliAction::InspectConfig => {
            let composition = AppComposition::default();
            match composition.inspect_config_usecase().execute() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::InitConfig => {
            let composition = AppComposition::default();
            match composition.init_config_usecase().execute() {
                Ok(path) => println!("config template: {}", path.display()),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Classify { options, quiet } => {
            let composition = AppComposition::new(quiet);
            let format = options.output;
            let rendered = match composition.classify_usecase().execute(options).await {
                Ok(outcome) => render_outcome(&outcome, format),
                Err(err) => Err(err),
            };
            match rendered {
                Ok(text) => print!("{text}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
    }
}
