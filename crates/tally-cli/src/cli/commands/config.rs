//! `tally config` – show where the config lives and what is in effect.

use anyhow::Result;
use tally_core::config::{self, TallyConfig};

pub fn run_config(cfg: &TallyConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
