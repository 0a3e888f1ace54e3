//! HTTP query provider.
//!
//! Issues `GET {endpoint}?{param}={text}` and reads a JSON list of items. The
//! catalogue endpoints are not uniform, so decoding is lenient:
//!
//! - the body may be a bare array or an object wrapping it in `items`,
//!   `results` or `data`
//! - ids may be strings or numbers
//! - `title` is accepted for `name`, `overview` for `description`, and
//!   `poster`/`posterUrl`/`imageUrl` for `image`

use crate::environment::QueryProvider;
use crate::error::QueryError;
use crate::item::Item;
use serde::Deserialize;
use std::future::Future;

/// Query provider backed by a JSON search endpoint.
#[derive(Debug, Clone)]
pub struct HttpQueryProvider {
    client: reqwest::Client,
    endpoint: String,
    param: String,
}

impl HttpQueryProvider {
    /// Query `endpoint` with the text in the `q` parameter.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            param: "q".to_string(),
        }
    }

    /// Use a different query-string parameter for the text.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// The endpoint being queried.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryProvider for HttpQueryProvider {
    fn query(&self, text: &str) -> impl Future<Output = Result<Vec<Item>, QueryError>> + Send {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[(self.param.as_str(), text)]);

        async move {
            let response = request.send().await?.error_for_status()?;
            let body = response.bytes().await?;
            parse_items(&body)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    List(Vec<WireItem>),
    Wrapped {
        #[serde(alias = "results", alias = "data")]
        items: Vec<WireItem>,
    },
}

#[derive(Deserialize)]
struct WireItem {
    id: WireId,
    #[serde(alias = "title")]
    name: String,
    #[serde(default, alias = "overview")]
    description: Option<String>,
    #[serde(default, alias = "poster", alias = "posterUrl", alias = "imageUrl")]
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireItem> for Item {
    fn from(wire: WireItem) -> Self {
        let id = match wire.id {
            WireId::Text(id) => id,
            WireId::Number(id) => id.to_string(),
        };
        Self {
            id,
            name: wire.name,
            description: wire.description,
            image: wire.image,
        }
    }
}

/// Decode a search response body.
///
/// # Errors
///
/// Returns [`QueryError::Decode`] if the body is not one of the accepted shapes.
pub fn parse_items(body: &[u8]) -> Result<Vec<Item>, QueryError> {
    let body: Body =
        serde_json::from_slice(body).map_err(|e| QueryError::Decode(e.to_string()))?;
    let items = match body {
        Body::List(items) | Body::Wrapped { items } => items,
    };
    Ok(items.into_iter().map(Item::from).collect())
}
