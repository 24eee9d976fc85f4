//! Request bodies for the user endpoints.

use super::credential::Credential;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single JSON object (one attribute set, one event, one purchase).
pub type Object = Map<String, Value>;

/// The provider accepts either a single object or an array of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Records {
    One(Object),
    Many(Vec<Object>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::One(obj) => usize::from(!obj.is_empty()),
            Records::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Object> for Records {
    fn from(obj: Object) -> Self {
        Records::One(obj)
    }
}

impl From<Vec<Object>> for Records {
    fn from(items: Vec<Object>) -> Self {
        Records::Many(items)
    }
}

impl TryFrom<Value> for Records {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(Records::One(obj)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(obj) => Ok(obj),
                    other => Err(Error::validation_with_context(
                        "records must be JSON objects",
                        ErrorContext::new()
                            .with_field_path(format!("records[{}]", idx))
                            .with_details(format!("got {}", json_kind(&other)))
                            .with_source("payload"),
                    )),
                })
                .collect::<Result<Vec<_>>>()
                .map(Records::Many),
            other => Err(Error::validation_with_context(
                "records must be a JSON object or an array of objects",
                ErrorContext::new()
                    .with_details(format!("got {}", json_kind(&other)))
                    .with_source("payload"),
            )),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn records_absent(r: &Option<Records>) -> bool {
    r.as_ref().map_or(true, Records::is_empty)
}

fn ids_absent(ids: &Option<Vec<String>>) -> bool {
    ids.as_ref().map_or(true, Vec::is_empty)
}

/// Body of `POST /users/track`. Absent or empty sections are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserTrack {
    #[serde(skip_serializing_if = "records_absent")]
    pub attributes: Option<Records>,
    #[serde(skip_serializing_if = "records_absent")]
    pub events: Option<Records>,
    #[serde(skip_serializing_if = "records_absent")]
    pub purchases: Option<Records>,
}

impl UserTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(mut self, attributes: impl Into<Records>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    pub fn events(mut self, events: impl Into<Records>) -> Self {
        self.events = Some(events.into());
        self
    }

    pub fn purchases(mut self, purchases: impl Into<Records>) -> Self {
        self.purchases = Some(purchases.into());
        self
    }
}

/// Body of `POST /users/delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDelete {
    #[serde(skip_serializing_if = "ids_absent")]
    pub external_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "ids_absent")]
    pub appboy_ids: Option<Vec<String>>,
}

impl UserDelete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn external_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn appboy_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.appboy_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Serialize `payload` and inject the credential under its field name.
pub(crate) fn with_credential<P: Serialize>(payload: &P, credential: &Credential) -> Result<Value> {
    let mut body = match serde_json::to_value(payload)? {
        Value::Object(map) => map,
        other => {
            return Err(Error::validation_with_context(
                "payload must serialize to a JSON object",
                ErrorContext::new()
                    .with_details(format!("got {}", json_kind(&other)))
                    .with_source("payload"),
            ))
        }
    };
    body.insert(
        credential.field_name().to_string(),
        Value::String(credential.secret().to_string()),
    );
    Ok(Value::Object(body))
}
