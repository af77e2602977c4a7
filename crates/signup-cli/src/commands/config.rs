use anyhow::Result;
use signup_engine::FormConfig;

pub fn execute(config: &FormConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
