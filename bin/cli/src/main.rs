use clap::Parser;
use phrasebridge_cli::{cli::Args, config::AppConfig, render, speech::LogSynthesizer};
use phrasebridge_conversation::{RequestOutcome, Session, SuggestionField};
use phrasebridge_suggest::PhrasebookService;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,phrasebridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let service = PhrasebookService::from_config(&config.suggestions);
    let mut session = Session::new(config.session).with_context(args.context());

    match session.request_suggestions(&service).await {
        Ok(RequestOutcome::Completed { .. }) => {}
        Ok(RequestOutcome::Incomplete { missing }) => {
            eprintln!("{}", render::missing_fields(&missing));
            return ExitCode::from(2);
        }
        Err(report) => {
            tracing::error!("{report}");
            if let Some(notice) = session.failure_notice() {
                eprintln!("{notice}");
            }
            return ExitCode::FAILURE;
        }
    }

    if args.json {
        match render::json(&session) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to render suggestions");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render::text(&session));
    }

    if args.speak {
        for index in 0..session.suggestions().len() {
            for field in [SuggestionField::Source, SuggestionField::Translation] {
                if let Err(report) = session.speak(index, field, &LogSynthesizer) {
                    tracing::warn!("{report}");
                }
            }
        }
    }

    ExitCode::SUCCESS
}
