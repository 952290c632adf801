//! Config subcommand handling

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::ConfigAction;
use super::presenter::Presenter;

/// Handle a `config` subcommand
pub async fn handle_config_command<S>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError>
where
    S: ConfigStore,
{
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!("Created config at {}", store.path().display()));
        }

        ConfigAction::List => {
            let config = store.load().await?;
            presenter.output(&entry("lessons_dir", config.lessons_dir.clone()));
            presenter.output(&entry("mute", config.mute.map(|v| v.to_string())));
            presenter.output(&entry("autoplay", config.autoplay.map(|v| v.to_string())));
        }

        ConfigAction::Path => {
            presenter.output(&store.path().display().to_string());
        }
    }

    Ok(())
}

fn entry(key: &str, value: Option<String>) -> String {
    match value {
        Some(value) => format!("{} = {}", key, value),
        None => format!("{} = (not set)", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[tokio::test]
    async fn init_creates_and_then_refuses() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(ConfigAction::Init, &store, &presenter)
            .await
            .unwrap();
        assert!(store.exists());

        let err = handle_config_command(ConfigAction::Init, &store, &presenter)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_works_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(ConfigAction::List, &store, &presenter)
            .await
            .unwrap();
    }

    #[test]
    fn entry_formats_unset_values() {
        assert_eq!(entry("mute", None), "mute = (not set)");
        assert_eq!(entry("mute", Some("true".into())), "mute = true");
    }
}
