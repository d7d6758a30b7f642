use serde::{Deserialize, Serialize};

/// Identity of an authenticated caller.
///
/// Whatever authenticates the caller (session, token check) lives
/// upstream of this crate; the dispatcher only consumes the resolved
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub name: String,
}

impl Principal {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Per-invocation caller context. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    principal: Option<Principal>,
}

impl CallContext {
    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Context carrying an authenticated principal.
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// The authenticated principal, when one was established upstream.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_context_has_no_principal() {
        assert!(CallContext::anonymous().principal().is_none());
        assert!(CallContext::default().principal().is_none());
    }

    #[test]
    fn authenticated_context_exposes_principal() {
        let context = CallContext::authenticated(Principal::new(1, "Demo User"));
        let principal = context.principal().unwrap();
        assert_eq!(principal.id, 1);
        assert_eq!(principal.name, "Demo User");
    }

    #[test]
    fn principal_serializes_with_wire_keys() {
        let principal = Principal::new(1, "Demo User");
        assert_eq!(
            serde_json::to_value(&principal).unwrap(),
            serde_json::json!({ "id": 1, "name": "Demo User" })
        );
    }
}
