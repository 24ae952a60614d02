use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn execute(headful: bool, profile: Option<PathBuf>) -> Result<()> {
    let runtime = super::runtime()?;

    runtime.block_on(async {
        let manager = super::build_manager(headful, profile)?;

        println!("🔐 Logging into Healthie...");
        manager
            .acquire()
            .await
            .context("Could not establish a Healthie session")?;
        println!("✅ Session established");

        manager.close().await?;
        Ok(())
    })
}
