use askama::Template;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use uuid::Uuid;

use crate::error::AppError;
use crate::form::parser::{self, FormPost};
use crate::form::{FieldError, FormState, Intent, Visibility, fields};
use crate::models::DishCategory;
use crate::state::SharedState;
use crate::submit::{self, Notice};

use super::button::{ButtonControl, ButtonKind};

/// Everything the form template needs to draw the current state.
pub struct FormView {
    form_id: Uuid,
    form: FormState,
    errors: Vec<FieldError>,
    submitting: bool,
}

pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl FormView {
    /// `submitting` is this form instance's own flag, not the server's.
    pub fn new(form_id: Uuid, form: FormState, submitting: bool) -> Self {
        Self {
            form_id,
            form,
            errors: Vec::new(),
            submitting,
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn form_id(&self) -> Uuid {
        self.form_id
    }

    pub fn value(&self, name: &str) -> &str {
        self.form.value(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    pub fn visibility(&self) -> Visibility {
        self.form.visibility()
    }

    pub fn no_category(&self) -> bool {
        self.form.category().is_none()
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        DishCategory::ALL
            .iter()
            .map(|c| CategoryOption {
                value: c.as_str(),
                label: c.label(),
                selected: self.form.category() == Some(*c),
            })
            .collect()
    }

    pub fn preparation_time_pattern(&self) -> &'static str {
        fields::PREPARATION_TIME_PATTERN
    }

    pub fn buttons(&self) -> Vec<ButtonControl> {
        vec![
            ButtonControl::new("Submit", ButtonKind::Submit, "button submit")
                .on_click(Intent::Submit)
                .disable_if(self.submitting),
            ButtonControl::new("Reset", ButtonKind::Submit, "button reset").on_click(Intent::Reset),
        ]
    }
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormPageTemplate {
    view: FormView,
    notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "details.html")]
struct DetailsTemplate {
    view: FormView,
}

fn render_page(
    status: StatusCode,
    view: FormView,
    notice: Option<Notice>,
) -> Result<Response, AppError> {
    let page = FormPageTemplate { view, notice };
    Ok((status, Html(page.render()?)).into_response())
}

fn parse(headers: &HeaderMap, body: &[u8]) -> Result<FormPost, AppError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    parser::parse_post(content_type, body).map_err(AppError::BadRequest)
}

/// A fresh page is a new form instance with its own token.
pub async fn show() -> Result<Response, AppError> {
    let view = FormView::new(Uuid::now_v7(), FormState::new(), false);
    render_page(StatusCode::OK, view, None)
}

pub async fn post(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let FormPost {
        intent,
        form_id,
        mut form,
    } = parse(&headers, &body)?;

    match intent {
        Intent::Reset => {
            form.reset();
            let view = FormView::new(form_id, form, state.gate.is_submitting(form_id));
            render_page(StatusCode::OK, view, None)
        }
        Intent::Select => {
            let view = FormView::new(form_id, form, state.gate.is_submitting(form_id));
            render_page(StatusCode::OK, view, None)
        }
        Intent::Submit => match submit::run(&state, form_id, &form).await {
            Err(errors) => {
                tracing::debug!(count = errors.len(), "Form rejected by field constraints");
                let view = FormView::new(form_id, form, state.gate.is_submitting(form_id))
                    .with_errors(errors);
                render_page(StatusCode::UNPROCESSABLE_ENTITY, view, None)
            }
            Ok(notice) => {
                let status = match notice {
                    Notice::Busy => StatusCode::CONFLICT,
                    _ => StatusCode::OK,
                };
                let view = FormView::new(form_id, form, state.gate.is_submitting(form_id));
                render_page(status, view, Some(notice))
            }
        },
    }
}

/// HTMX partial: the optional field group for the posted category.
pub async fn details_partial(headers: HeaderMap, body: Bytes) -> Result<Response, AppError> {
    let FormPost { form_id, form, .. } = parse(&headers, &body)?;
    let partial = DetailsTemplate {
        view: FormView::new(form_id, form, false),
    };
    Ok(Html(partial.render()?).into_response())
}
