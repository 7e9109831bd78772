//! URL-encoded form bodies with repeated fields.
//!
//! `axum::Form` deserializes through `serde_urlencoded`, which cannot collect
//! repeated keys such as a list of ticked checkboxes.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
};
use url::form_urlencoded;

/// A decoded form body keeping every name/value pair in order.
#[derive(Debug, Clone, Default)]
pub struct MultiForm {
    pairs: Vec<(String, String)>,
}

impl MultiForm {
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value of `name`, or `""`.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Every value of `name`, in submission order.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Whether a checkbox named `name` was ticked.
    #[must_use]
    pub fn checked(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }
}

impl<S> FromRequest<S> for MultiForm
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(Self::parse(&body))
    }
}
