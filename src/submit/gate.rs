use dashmap::DashSet;
use uuid::Uuid;

/// Per-form "submitting" flags, keyed by the form token rendered into each
/// page. A form is closed while its own dish is on the way to the API; other
/// forms are unaffected.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    in_flight: DashSet<Uuid>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for `form_id`. Returns `None` if that form is already submitting.
    pub fn try_begin(&self, form_id: Uuid) -> Option<InFlight<'_>> {
        self.in_flight
            .insert(form_id)
            .then_some(InFlight {
                gate: self,
                form_id,
            })
    }

    pub fn is_submitting(&self, form_id: Uuid) -> bool {
        self.in_flight.contains(&form_id)
    }
}

/// Held for the duration of one submission; reopens the form's gate on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    gate: &'a SubmissionGate,
    form_id: Uuid,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.remove(&self.form_id);
    }
}
