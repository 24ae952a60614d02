use crate::session::{ensure_signed_in, SessionManager};
use crate::wait::{self, FirstReady};
use healthie_core::{Error, PatientRecord, Result};

/// Search Healthie for a patient by name and date of birth.
///
/// Returns `Ok(None)` when the search completes but matches nothing; "no
/// such patient" is an expected outcome, not an error.
pub async fn find_patient(
    manager: &SessionManager,
    name: &str,
    date_of_birth: &str,
) -> Result<Option<PatientRecord>> {
    let session = manager.acquire().await?;
    let page = session.page();

    let config = manager.config();
    let selectors = &config.selectors;
    let timeouts = &config.timeouts;

    tracing::info!(%name, "Searching for patient");
    page.goto(&config.endpoints.patient_search_url).await?;
    ensure_signed_in(page, &config.endpoints.sign_in_marker).await?;

    let query = format!("{name} {date_of_birth}");
    wait::fill_when_ready(page, &selectors.patient_search_input, &query, timeouts).await?;

    wait::for_selector(page, &selectors.patient_search_submit, timeouts).await?;
    page.click(&selectors.patient_search_submit).await?;

    match wait::for_either(
        page,
        &selectors.patient_result_row,
        &selectors.patient_empty_marker,
        "patient search results",
        timeouts,
    )
    .await?
    {
        FirstReady::Secondary => {
            tracing::info!(%name, "No matching patient");
            Ok(None)
        }
        FirstReady::Primary => {
            let patient_id = page
                .attribute(&selectors.patient_result_row, &selectors.patient_id_attr)
                .await?
                .ok_or_else(|| {
                    Error::Browser(format!(
                        "patient result row is missing the {} attribute",
                        selectors.patient_id_attr
                    ))
                })?;

            let mut record = PatientRecord::new(patient_id);
            if let Some(text) = page.text(&selectors.patient_name_cell).await? {
                record = record.with_field("name", text);
            }
            if let Some(text) = page.text(&selectors.patient_dob_cell).await? {
                record = record.with_field("date_of_birth", text);
            }

            tracing::info!(patient_id = %record.patient_id, "Found patient");
            Ok(Some(record))
        }
    }
}
