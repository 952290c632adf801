//! HearSay CLI entry point

use std::process::ExitCode;

use clap::Parser;

use hearsay::cli::{
    app::{load_merged_config, run_list, run_play, EXIT_ERROR},
    args::{Cli, Commands, PlayOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use hearsay::domain::config::AppConfig;
use hearsay::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    match cli.command {
        Commands::Play {
            lesson,
            lessons_dir,
            mute,
            autoplay,
            out,
        } => {
            let cli_config = AppConfig {
                lessons_dir,
                mute: if mute { Some(true) } else { None },
                autoplay: if autoplay { Some(true) } else { None },
            };
            let config = load_merged_config(cli_config).await;

            let options = PlayOptions {
                lesson,
                lessons_dir: config.lessons_dir_or_default().to_string(),
                mute: config.mute_or_default(),
                autoplay: config.autoplay_or_default(),
                out,
            };

            run_play(options).await
        }

        Commands::List { lessons_dir } => {
            let cli_config = AppConfig {
                lessons_dir,
                ..AppConfig::empty()
            };
            let config = load_merged_config(cli_config).await;
            run_list(config.lessons_dir_or_default()).await
        }

        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
