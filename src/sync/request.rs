//! Request-side types for an intercepted persistence attempt.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Attribute map exchanged with entities and handlers.
pub type Attributes = Map<String, Value>;

/// The persistence action an entity is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Patch,
    Delete,
}

impl Action {
    /// Canonical HTTP verb for this action.
    pub fn http_method(self) -> &'static str {
        match self {
            Action::Create => "POST",
            Action::Read => "GET",
            Action::Update => "PUT",
            Action::Patch => "PATCH",
            Action::Delete => "DELETE",
        }
    }

    /// Whether the attempt carries an attribute payload.
    pub fn carries_data(self) -> bool {
        matches!(self, Action::Create | Action::Update | Action::Patch)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Patch => "patch",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// How a persistence attempt is serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMethod {
    /// Hand the attempt to the native transport.
    Native,
    /// Dispatch through the route registry.
    #[default]
    FauxServer,
}

impl SyncMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncMethod::Native => "native",
            SyncMethod::FauxServer => "faux-server",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(SyncMethod::Native),
            "faux-server" => Ok(SyncMethod::FauxServer),
            other => Err(format!("unknown sync method `{other}`")),
        }
    }
}

/// A single persistence attempt, built fresh by the interceptor.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub action: Action,
    pub url: String,
    pub data: Option<Attributes>,
}

/// What a handler sees about the request it is servicing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncContext {
    /// Effective verb (`POST` for every non-GET verb under emulation).
    pub http_method: &'static str,
    /// The intended verb when emulating over POST.
    pub http_method_override: Option<&'static str>,
    pub url: String,
    pub data: Option<Attributes>,
}

impl SyncContext {
    /// Build the context for `request`, applying verb emulation when asked to.
    pub fn new(request: &RequestDescriptor, emulate_http: bool) -> Self {
        let verb = request.action.http_method();
        let (http_method, http_method_override) = if emulate_http && verb != "GET" {
            ("POST", Some(verb))
        } else {
            (verb, None)
        };
        Self {
            http_method,
            http_method_override,
            url: request.url.clone(),
            data: request.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: Action) -> RequestDescriptor {
        RequestDescriptor {
            action,
            url: "library-app/books".into(),
            data: None,
        }
    }

    #[test]
    fn test_canonical_verbs() {
        assert_eq!(Action::Create.http_method(), "POST");
        assert_eq!(Action::Read.http_method(), "GET");
        assert_eq!(Action::Update.http_method(), "PUT");
        assert_eq!(Action::Patch.http_method(), "PATCH");
        assert_eq!(Action::Delete.http_method(), "DELETE");
    }

    #[test]
    fn test_emulation() {
        let ctx = SyncContext::new(&request(Action::Update), true);
        assert_eq!(ctx.http_method, "POST");
        assert_eq!(ctx.http_method_override, Some("PUT"));

        let ctx = SyncContext::new(&request(Action::Create), true);
        assert_eq!(ctx.http_method, "POST");
        assert_eq!(ctx.http_method_override, Some("POST"));

        // GET is never emulated
        let ctx = SyncContext::new(&request(Action::Read), true);
        assert_eq!(ctx.http_method, "GET");
        assert_eq!(ctx.http_method_override, None);

        let ctx = SyncContext::new(&request(Action::Delete), false);
        assert_eq!(ctx.http_method, "DELETE");
        assert_eq!(ctx.http_method_override, None);
    }

    #[test]
    fn test_sync_method_parsing() {
        assert_eq!("native".parse::<SyncMethod>(), Ok(SyncMethod::Native));
        assert_eq!("faux-server".parse::<SyncMethod>(), Ok(SyncMethod::FauxServer));
        assert!("ajax".parse::<SyncMethod>().is_err());
        assert_eq!(SyncMethod::default(), SyncMethod::FauxServer);
    }
}
