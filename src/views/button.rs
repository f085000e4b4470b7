use std::fmt;

use askama::Template;

use crate::form::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Submit,
    Reset,
    Button,
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ButtonKind::Submit => "submit",
            ButtonKind::Reset => "reset",
            ButtonKind::Button => "button",
        })
    }
}

/// A clickable control. Its click handler is the form intent it posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonControl {
    pub label: String,
    pub kind: ButtonKind,
    pub on_click: Option<Intent>,
    pub disabled: bool,
    pub class: String,
}

impl ButtonControl {
    pub fn new(label: impl Into<String>, kind: ButtonKind, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            on_click: None,
            disabled: false,
            class: class.into(),
        }
    }

    pub fn on_click(mut self, intent: Intent) -> Self {
        self.on_click = Some(intent);
        self
    }

    pub fn disable_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The intent a click posts. A disabled button posts nothing.
    pub fn handler(&self) -> Option<Intent> {
        if self.disabled { None } else { self.on_click }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        ButtonTemplate { button: self }.render()
    }
}

#[derive(Template)]
#[template(path = "button.html")]
struct ButtonTemplate<'a> {
    button: &'a ButtonControl,
}
