use anyhow::Result;

use vitrine_core::theme::ThemeController;
use vitrine_core::{AppConfig, FileStore, PreferenceStore, Theme};

use crate::ThemeAction;

pub fn run(config: &AppConfig, action: ThemeAction) -> Result<()> {
    let mut store = FileStore::new(config.preferences_path());
    let key = config.theme.storage_key.as_str();
    let stored = ThemeController::new(Box::new(store.clone()), key).get();

    match action {
        ThemeAction::Get => println!("{}", stored),
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse()?;
            store.set(key, theme.as_str())?;
            println!("Theme set to {}", theme);
        }
        ThemeAction::Toggle => {
            let theme = stored.toggled();
            store.set(key, theme.as_str())?;
            println!("Theme toggled: {} -> {}", stored, theme);
        }
    }

    Ok(())
}
