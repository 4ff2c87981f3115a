use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn try_edit(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", yaml);
    }

    if *edit_config {
        let path = Config::config_file();
        let fallback = default_editor();

        let mut candidates = vec![editor.clone().unwrap_or_else(|| fallback.clone())];
        if candidates[0] != fallback {
            candidates.push(fallback);
        }

        let used = candidates.iter().find(|e| {
            let ok = try_edit(e, &path);
            if !ok {
                warning(format!("Editor '{}' not available", e));
            }
            ok
        });

        match used {
            Some(e) => success(format!("Configuration file edited with '{}'", e)),
            None => {
                return Err(AppError::Config(format!(
                    "could not open {} in any editor",
                    path.display()
                )));
            }
        }

        // the edited file must still load
        Config::load()?;
    }

    Ok(())
}
