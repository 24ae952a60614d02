use crate::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use healthie_core::BookingOutcome;
use std::path::PathBuf;

pub fn execute(
    patient_id: &str,
    date: &str,
    time: &str,
    headful: bool,
    profile: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let runtime = super::runtime()?;

    runtime.block_on(async {
        let manager = super::build_manager(headful, profile)?;

        // Close before surfacing any flow error so a failed booking does not
        // leave Chrome running until process exit.
        let outcome = healthie_browser::create_appointment(&manager, patient_id, date, time).await;
        let closed = manager.close().await;
        let outcome = outcome.context("Appointment booking failed")?;
        closed?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            OutputFormat::Pretty => match &outcome {
                BookingOutcome::Created(record) => {
                    println!(
                        "✅ Appointment {} booked for patient {} on {} at {}",
                        style(&record.appointment_id).green().bold(),
                        record.patient_id,
                        record.date,
                        record.time
                    );
                }
                BookingOutcome::Rejected { reason } => {
                    println!("⛔ Booking rejected: {}", style(reason).yellow());
                }
            },
        }

        Ok(())
    })
}
