use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque pagination token naming the page after some position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub full_name: String,
}

/// One page of people. `next == None` marks the end of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub people: Vec<Person>,
    #[serde(default)]
    pub next: Option<Cursor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct FetchError {
    description: String,
}

impl FetchError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start fetch worker: {0}")]
    Worker(#[from] io::Error),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
