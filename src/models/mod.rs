pub mod dish;

pub use dish::{DishCategory, DishDetails, DishSubmission};
