use uuid::Uuid;

use super::{FormState, Intent};

/// Hidden field carrying the token of the page a post came from.
pub const FORM_ID: &str = "form_id";

/// A decoded form post: which action was asked for, which form instance sent
/// it, and the field values sent with it.
#[derive(Debug, Clone)]
pub struct FormPost {
    pub intent: Intent,
    pub form_id: Uuid,
    pub form: FormState,
}

/// Parse a form post body. A post without an `intent` field is a submit,
/// which is what pressing Enter in a text input sends. A post without a
/// `form_id` starts a new form instance.
pub fn parse_post(content_type: Option<&str>, body: &[u8]) -> Result<FormPost, String> {
    let ct = content_type.unwrap_or("application/x-www-form-urlencoded");
    if !ct.contains("application/x-www-form-urlencoded") {
        return Err(format!("Unsupported content type: {ct}"));
    }

    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    let pairs: Vec<(String, String)> = form_urlencoded::parse(body_str.as_bytes())
        .into_owned()
        .collect();

    let intent = match pairs.iter().find(|(k, _)| k == "intent") {
        Some((_, v)) => v.parse::<Intent>()?,
        None => Intent::Submit,
    };

    let form_id = match pairs.iter().find(|(k, _)| k == FORM_ID) {
        Some((_, v)) => v
            .parse::<Uuid>()
            .map_err(|e| format!("Invalid {FORM_ID}: {e}"))?,
        None => Uuid::now_v7(),
    };

    Ok(FormPost {
        intent,
        form_id,
        form: FormState::from_fields(pairs),
    })
}
