pub mod config;
pub mod run;
pub mod simulate;
pub mod theme;

use anyhow::{Context, Result};
use tracing::info;

use vitrine_core::{AppConfig, PageLayout};

/// The configured page layout, or the built-in landing page
pub fn load_layout(config: &AppConfig) -> Result<PageLayout> {
    match config.layout_path() {
        Some(path) => {
            info!("Loading page layout from {}", path.display());
            PageLayout::load(&path)
                .with_context(|| format!("Failed to load layout {}", path.display()))
        }
        None => Ok(PageLayout::default()),
    }
}
