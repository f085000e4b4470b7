use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::models::DishSubmission;

#[derive(Debug)]
pub enum SubmitError {
    /// The request never got a response: DNS, connect, TLS or timeout.
    Transport(reqwest::Error),
    /// The API answered with a non-2xx status.
    Status(StatusCode),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Transport(err) => write!(f, "{err}"),
            SubmitError::Status(status) => {
                write!(f, "Request failed with status code {}", status.as_u16())
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Client for the remote dish API.
pub struct DishClient {
    client: reqwest::Client,
    url: String,
}

impl DishClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one dish. Any 2xx counts as created; the response body is not read.
    pub async fn create(&self, dish: &DishSubmission) -> Result<(), SubmitError> {
        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(dish)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status))
        }
    }
}
