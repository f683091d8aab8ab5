//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::{Settings, OPENAI_API_KEY_VAR, TMDB_API_KEY_VAR};
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command against `--config` or the default location.
pub fn run_config(action: &ConfigAction, config: Option<&str>, settings: Settings) -> Result<()> {
    let config_path = resolve_config_path(config);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("# {}\n", config_path.display());
            println!("{}", toml_str);
            Output::info(&format!(
                "API keys come from {} and {}, never from this file.",
                TMDB_API_KEY_VAR, OPENAI_API_KEY_VAR
            ));
        }

        ConfigAction::Edit => {
            if !config_path.exists() {
                settings.save_to(&config_path)?;
                Output::info(&format!("Created default config at {}", config_path.display()));
            }

            let editor = editor_command(|name| std::env::var(name).ok());
            Output::info(&format!("Opening config in {}...", editor));

            match std::process::Command::new(&editor).arg(&config_path).status() {
                Ok(s) if s.success() => match Settings::load_from(Some(&config_path)) {
                    Ok(_) => Output::success("Config saved."),
                    Err(e) => Output::warning(&format!("Config saved but does not parse: {}", e)),
                },
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {}", config_path.display()));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn resolve_config_path(config: Option<&str>) -> PathBuf {
    match config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    }
}

/// $VISUAL, then $EDITOR, then vi.
fn editor_command<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_wins() {
        assert_eq!(
            resolve_config_path(Some("/tmp/mw.toml")),
            PathBuf::from("/tmp/mw.toml")
        );
        assert_eq!(resolve_config_path(None), Settings::default_config_path());
    }

    #[test]
    fn test_editor_fallback_order() {
        assert_eq!(editor_command(|_| None), "vi");
        assert_eq!(
            editor_command(|name| (name == "EDITOR").then(|| "nano".to_string())),
            "nano"
        );
        assert_eq!(
            editor_command(|name| Some(format!("{}-editor", name.to_lowercase()))),
            "visual-editor"
        );
    }
}
