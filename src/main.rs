//! `disqus-relay` 바이너리 진입점.

use serde_json::json;

use disqus_relay::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Fetch { request, echo } => {
            let output = match composition.fetch_posts_usecase().execute(request).await {
                Ok(output) => output,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            };

            let rendered = if echo {
                serde_json::to_string_pretty(&json!({
                    "content": output.content,
                    "parameters": output.parameters,
                }))
            } else {
                serde_json::to_string_pretty(&output.content)
            };

            match rendered {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    eprintln!("error: failed to render response: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
