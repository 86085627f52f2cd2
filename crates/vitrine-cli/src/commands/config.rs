use anyhow::Result;

use vitrine_core::AppConfig;

/// Print where the config lives, writing the defaults first when asked
pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        config.save()?;
        println!("Wrote default config to {}", path.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
