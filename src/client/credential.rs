use std::fmt;

/// Static credential injected into every request body.
///
/// The current REST API authenticates with `api_key`; the legacy Appboy
/// endpoint expects the same kind of secret under `app_group_id`.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    AppGroupId(String),
}

impl Credential {
    pub fn api_key(key: impl Into<String>) -> Self {
        Credential::ApiKey(key.into())
    }

    pub fn app_group_id(id: impl Into<String>) -> Self {
        Credential::AppGroupId(id.into())
    }

    /// JSON field the secret is sent under.
    pub fn field_name(&self) -> &'static str {
        match self {
            Credential::ApiKey(_) => "api_key",
            Credential::AppGroupId(_) => "app_group_id",
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            Credential::ApiKey(s) | Credential::AppGroupId(s) => s,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}=<redacted>)", self.field_name())
    }
}
