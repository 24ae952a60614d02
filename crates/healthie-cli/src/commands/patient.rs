use crate::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

pub fn execute(
    name: &str,
    dob: &str,
    headful: bool,
    profile: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let runtime = super::runtime()?;

    runtime.block_on(async {
        let manager = super::build_manager(headful, profile)?;

        // Close before surfacing any flow error so a failed search does not
        // leave Chrome running until process exit.
        let result = healthie_browser::find_patient(&manager, name, dob).await;
        let closed = manager.close().await;
        let result = result.context("Patient search failed")?;
        closed?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Pretty => match result {
                Some(record) => {
                    println!(
                        "✅ Found patient {}",
                        style(&record.patient_id).green().bold()
                    );
                    for (key, value) in &record.extra {
                        println!("   {key}: {}", value.as_str().unwrap_or_default());
                    }
                }
                None => {
                    println!("🔍 No patient matched {name} ({dob})");
                }
            },
        }

        Ok(())
    })
}
