use std::sync::Arc;

use crate::submit::{DishClient, SubmissionGate};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub dishes: DishClient,
    pub gate: SubmissionGate,
}
