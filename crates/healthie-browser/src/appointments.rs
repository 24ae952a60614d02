use crate::session::{ensure_signed_in, SessionManager};
use crate::wait::{self, FirstReady};
use healthie_core::{AppointmentRecord, BookingOutcome, Error, Result};
use serde_json::Map;

/// Book an appointment for a patient.
///
/// A rejection by the UI (slot taken, invalid time) comes back as
/// `BookingOutcome::Rejected` with whatever reason the page shows; only
/// infrastructure problems raise errors.
pub async fn create_appointment(
    manager: &SessionManager,
    patient_id: &str,
    date: &str,
    time: &str,
) -> Result<BookingOutcome> {
    let session = manager.acquire().await?;
    let page = session.page();

    let config = manager.config();
    let selectors = &config.selectors;
    let timeouts = &config.timeouts;

    tracing::info!(%patient_id, %date, %time, "Creating appointment");
    page.goto(&config.endpoints.appointment_form_for(patient_id))
        .await?;
    ensure_signed_in(page, &config.endpoints.sign_in_marker).await?;

    wait::fill_when_ready(page, &selectors.appointment_date_input, date, timeouts).await?;
    wait::fill_when_ready(page, &selectors.appointment_time_input, time, timeouts).await?;

    wait::for_selector(page, &selectors.appointment_submit, timeouts).await?;
    page.click(&selectors.appointment_submit).await?;

    match wait::for_either(
        page,
        &selectors.appointment_confirmation,
        &selectors.appointment_rejection,
        "appointment booking result",
        timeouts,
    )
    .await?
    {
        FirstReady::Secondary => {
            let reason = page
                .text(&selectors.appointment_rejection)
                .await?
                .unwrap_or_else(|| "appointment was not created".to_string());

            tracing::info!(%patient_id, %reason, "Appointment rejected");
            Ok(BookingOutcome::Rejected { reason })
        }
        FirstReady::Primary => {
            let appointment_id = page
                .attribute(
                    &selectors.appointment_confirmation,
                    &selectors.appointment_id_attr,
                )
                .await?
                .ok_or_else(|| {
                    Error::Browser(format!(
                        "confirmation element is missing the {} attribute",
                        selectors.appointment_id_attr
                    ))
                })?;

            tracing::info!(%appointment_id, "Appointment created");
            Ok(BookingOutcome::Created(AppointmentRecord {
                appointment_id,
                patient_id: patient_id.to_string(),
                date: date.to_string(),
                time: time.to_string(),
                extra: Map::new(),
            }))
        }
    }
}
