pub mod client;
pub mod gate;

use std::fmt;

use tracing::Instrument;
use uuid::Uuid;

use crate::form::{FieldError, FormState};
use crate::state::AppState;

pub use client::{DishClient, SubmitError};
pub use gate::SubmissionGate;

/// Result of a submit, shown to the user as a banner above the form.
#[derive(Debug)]
pub enum Notice {
    Sent,
    Failed(SubmitError),
    /// This form's previous submit was still in flight; nothing was sent.
    Busy,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Sent)
    }

    pub fn class(&self) -> &'static str {
        if self.is_error() {
            "notice notice-error"
        } else {
            "notice notice-success"
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Sent => f.write_str("Sending data..."),
            Notice::Failed(err) => write!(f, "Failed to create dish: {err}"),
            Notice::Busy => f.write_str("This form is already being submitted."),
        }
    }
}

/// Validate the form and send the dish. Field errors come back as `Err`
/// without touching the API.
///
/// `form_id` identifies the page the post came from; only a second submit
/// from the same page is refused while the first is pending.
pub async fn run(
    state: &AppState,
    form_id: Uuid,
    form: &FormState,
) -> Result<Notice, Vec<FieldError>> {
    let dish = form.collect()?;

    let Some(_in_flight) = state.gate.try_begin(form_id) else {
        tracing::warn!(%form_id, name = %dish.name, "Submit rejected, this form is already submitting");
        return Ok(Notice::Busy);
    };

    let attempt = Uuid::now_v7();
    let span = tracing::info_span!(
        "submit_dish",
        %attempt,
        %form_id,
        name = %dish.name,
        category = %dish.details.category(),
    );

    async {
        tracing::info!(url = %state.dishes.url(), "Sending dish");

        match state.dishes.create(&dish).await {
            Ok(()) => {
                tracing::info!("Dish created");
                Ok(Notice::Sent)
            }
            Err(err) => {
                tracing::warn!("Dish submission failed: {err}");
                Ok(Notice::Failed(err))
            }
        }
    }
    .instrument(span)
    .await
}
