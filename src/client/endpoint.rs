//! Endpoint resolution

/// REST endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UsersTrack,
    UsersDelete,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::UsersTrack => "/users/track",
            Endpoint::UsersDelete => "/users/delete",
        }
    }

    /// Full request URL. Computed per call and never cached on the client.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}
