pub mod fields;
pub mod parser;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{DishCategory, DishDetails, DishSubmission};

/// What a form post asks the server to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Submit,
    Reset,
    /// Re-render after a category change, for browsers without htmx.
    Select,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Submit => "submit",
            Intent::Reset => "reset",
            Intent::Select => "select",
        }
    }

    /// Only a submit is checked against the field constraints.
    pub fn skips_validation(&self) -> bool {
        !matches!(self, Intent::Submit)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submit" => Ok(Intent::Submit),
            "reset" => Ok(Intent::Reset),
            "select" => Ok(Intent::Select),
            other => Err(format!("Unknown intent: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Which optional field group is on screen. At most one flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub pizza_fields: bool,
    pub spiciness_field: bool,
    pub bread_field: bool,
}

impl From<Option<DishCategory>> for Visibility {
    fn from(category: Option<DishCategory>) -> Self {
        Visibility {
            pizza_fields: category == Some(DishCategory::Pizza),
            spiciness_field: category == Some(DishCategory::Soup),
            bread_field: category == Some(DishCategory::Sandwich),
        }
    }
}

/// Field values keyed by name, plus the selected dish category.
///
/// No category is the initial state; selecting one moves between
/// pizza, soup and sandwich, and [`FormState::reset`] returns to the start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<&'static str, String>,
    category: Option<DishCategory>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.set(name.as_ref(), value);
        }
        form
    }

    /// Store a field value. Names the form does not register are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(&field) = fields::ALL.iter().find(|f| **f == name) else {
            return false;
        };

        let value = value.into();
        if field == fields::TYPE {
            self.category = value.parse().ok();
        }
        self.values.insert(field, value);
        true
    }

    pub fn category(&self) -> Option<DishCategory> {
        self.category
    }

    pub fn visibility(&self) -> Visibility {
        self.category.into()
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the payload from the current values.
    ///
    /// Only the selected category's fields are read, so values left behind in
    /// a hidden group never reach the payload.
    pub fn collect(&self) -> Result<DishSubmission, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.value(fields::NAME);
        if name.is_empty() {
            errors.push(FieldError::new(fields::NAME, "Dish name is required"));
        }

        let preparation_time = self.value(fields::PREPARATION_TIME);
        if preparation_time.is_empty() {
            errors.push(FieldError::new(
                fields::PREPARATION_TIME,
                "Preparation time is required",
            ));
        } else if !fields::is_preparation_time(preparation_time) {
            errors.push(FieldError::new(
                fields::PREPARATION_TIME,
                "Use the format HH:MM:SS",
            ));
        }

        let details = match self.category {
            Some(category) => Some(self.details(category, &mut errors)),
            None => {
                errors.push(FieldError::new(fields::TYPE, "Select a dish type"));
                None
            }
        };

        match details {
            Some(details) if errors.is_empty() => Ok(DishSubmission {
                name: name.to_string(),
                preparation_time: preparation_time.to_string(),
                details,
            }),
            _ => Err(errors),
        }
    }

    fn details(&self, category: DishCategory, errors: &mut Vec<FieldError>) -> DishDetails {
        match category {
            DishCategory::Pizza => DishDetails::Pizza {
                no_of_slices: record(
                    errors,
                    fields::NO_OF_SLICES,
                    fields::optional_integer(
                        self.value(fields::NO_OF_SLICES),
                        fields::MIN_SLICES,
                        None,
                    ),
                ),
                diameter: record(
                    errors,
                    fields::DIAMETER,
                    fields::optional_decimal(
                        self.value(fields::DIAMETER),
                        fields::MIN_DIAMETER,
                        fields::DIAMETER_STEP,
                    ),
                ),
            },
            DishCategory::Soup => DishDetails::Soup {
                spiciness_scale: record(
                    errors,
                    fields::SPICINESS_SCALE,
                    fields::optional_integer(
                        self.value(fields::SPICINESS_SCALE),
                        fields::MIN_SPICINESS,
                        Some(fields::MAX_SPICINESS),
                    ),
                ),
            },
            DishCategory::Sandwich => DishDetails::Sandwich {
                slices_of_bread: record(
                    errors,
                    fields::SLICES_OF_BREAD,
                    fields::optional_integer(
                        self.value(fields::SLICES_OF_BREAD),
                        fields::MIN_BREAD_SLICES,
                        None,
                    ),
                ),
            },
        }
    }
}

fn record<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    result: Result<Option<T>, String>,
) -> Option<T> {
    result.unwrap_or_else(|message| {
        errors.push(FieldError::new(field, message));
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(category: &str, extra: &[(&str, &str)]) -> FormState {
        let mut form = FormState::from_fields([
            ("name", "Margherita"),
            ("preparation_time", "00:15:00"),
            ("type", category),
        ]);
        for (name, value) in extra {
            form.set(name, *value);
        }
        form
    }

    #[test]
    fn starts_with_every_group_hidden() {
        let form = FormState::new();
        assert_eq!(form.category(), None);
        assert_eq!(form.visibility(), Visibility::default());
    }

    #[test]
    fn selecting_a_category_shows_only_its_group() {
        for category in DishCategory::ALL {
            let mut form = FormState::new();
            form.set("type", category.as_str());
            let visible = form.visibility();

            assert_eq!(visible.pizza_fields, category == DishCategory::Pizza);
            assert_eq!(visible.spiciness_field, category == DishCategory::Soup);
            assert_eq!(visible.bread_field, category == DishCategory::Sandwich);
            assert_eq!(form.value("type"), category.as_str());
        }
    }

    #[test]
    fn switching_categories_moves_the_visible_group() {
        let mut form = FormState::new();
        form.set("type", "pizza");
        assert!(form.visibility().pizza_fields);

        form.set("type", "sandwich");
        assert_eq!(
            form.visibility(),
            Visibility {
                pizza_fields: false,
                spiciness_field: false,
                bread_field: true,
            }
        );
    }

    #[test]
    fn unknown_type_selects_nothing() {
        let form = FormState::from_fields([("type", "burger")]);
        assert_eq!(form.category(), None);
        assert_eq!(form.visibility(), Visibility::default());
    }

    #[test]
    fn unregistered_fields_are_ignored() {
        let mut form = FormState::new();
        assert!(!form.set("intent", "submit"));
        assert_eq!(form.value("intent"), "");
    }

    #[test]
    fn reset_clears_values_and_category() {
        let mut form = filled("soup", &[("spiciness_scale", "5")]);
        form.reset();

        assert_eq!(form, FormState::new());
        assert_eq!(form.value("name"), "");
        assert_eq!(form.visibility(), Visibility::default());
    }

    #[test]
    fn collects_pizza() {
        let form = filled("pizza", &[("no_of_slices", "8"), ("diameter", "30.5")]);
        let dish = form.collect().unwrap();

        assert_eq!(dish.name, "Margherita");
        assert_eq!(
            dish.details,
            DishDetails::Pizza {
                no_of_slices: Some(8),
                diameter: Some(30.5),
            }
        );
    }

    #[test]
    fn values_of_hidden_groups_are_dropped() {
        let form = filled(
            "soup",
            &[
                ("no_of_slices", "8"),
                ("diameter", "30.5"),
                ("spiciness_scale", "5"),
                ("slices_of_bread", "3"),
            ],
        );

        assert_eq!(
            form.collect().unwrap().details,
            DishDetails::Soup {
                spiciness_scale: Some(5),
            }
        );
    }

    #[test]
    fn falsy_optional_values_are_absent() {
        let pizza = filled("pizza", &[("no_of_slices", "0"), ("diameter", "")]);
        assert_eq!(
            pizza.collect().unwrap().details,
            DishDetails::Pizza {
                no_of_slices: None,
                diameter: None,
            }
        );

        let sandwich = filled("sandwich", &[("slices_of_bread", "0")]);
        assert_eq!(
            sandwich.collect().unwrap().details,
            DishDetails::Sandwich {
                slices_of_bread: None,
            }
        );

        for spiciness in ["0", ""] {
            let soup = filled("soup", &[("spiciness_scale", spiciness)]);
            assert_eq!(
                soup.collect().unwrap().details,
                DishDetails::Soup {
                    spiciness_scale: None,
                },
                "spiciness_scale = {spiciness:?}"
            );
        }

        for diameter in ["0.0", "-0", "0"] {
            let pizza = filled("pizza", &[("no_of_slices", "6"), ("diameter", diameter)]);
            assert_eq!(
                pizza.collect().unwrap().details,
                DishDetails::Pizza {
                    no_of_slices: Some(6),
                    diameter: None,
                },
                "diameter = {diameter:?}"
            );
        }
    }

    #[test]
    fn reports_every_violation() {
        let form = FormState::from_fields([
            ("preparation_time", "1:00"),
            ("type", "soup"),
            ("spiciness_scale", "42"),
        ]);

        let errors = form.collect().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "preparation_time", "spiciness_scale"]);
    }

    #[test]
    fn missing_category_is_an_error() {
        let form = FormState::from_fields([("name", "Soup?"), ("preparation_time", "00:01:00")]);
        let errors = form.collect().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("type", "Select a dish type")]);
    }

    #[test]
    fn intents_round_trip_through_their_wire_names() {
        for intent in [Intent::Submit, Intent::Reset, Intent::Select] {
            assert_eq!(intent.as_str().parse::<Intent>(), Ok(intent));
        }
        assert!(Intent::Reset.skips_validation());
        assert!(!Intent::Submit.skips_validation());
    }
}
