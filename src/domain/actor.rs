//! Agents and their inverse functional identifiers.

use serde::{Deserialize, Serialize};

use super::Iri;

/// An agent: a person (or system) identified by exactly one inverse
/// functional identifier (mbox, mbox_sha1sum, openid or account).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbox_sha1sum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

/// An account on an existing system, an alternative to mbox identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "homePage")]
    pub home_page: Iri,
    pub name: String,
}

impl Agent {
    /// Create an agent identified by a `mailto:` IRI.
    pub fn with_mbox(mbox: impl Into<String>) -> Self {
        Self {
            mbox: Some(mbox.into()),
            ..Self::default()
        }
    }

    /// Whether two agents share an inverse functional identifier.
    ///
    /// The display name is not identifying, so it is ignored.
    pub fn same_identity(&self, other: &Agent) -> bool {
        if let (Some(a), Some(b)) = (&self.mbox, &other.mbox) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.mbox_sha1sum, &other.mbox_sha1sum) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.openid, &other.openid) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.account, &other.account) {
            return a == b;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identity_ignores_name() {
        let a = Agent {
            name: Some("Alice".to_string()),
            ..Agent::with_mbox("mailto:alice@example.com")
        };
        let b = Agent::with_mbox("mailto:alice@example.com");
        assert!(a.same_identity(&b));
    }

    #[test]
    fn different_identifier_kinds_do_not_match() {
        let a = Agent::with_mbox("mailto:alice@example.com");
        let b = Agent {
            openid: Some("http://openid.example.com/alice".to_string()),
            ..Agent::default()
        };
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn accounts_match_on_home_page_and_name() {
        let account = |name: &str| Account {
            home_page: Iri::parse("http://lms.example.com").unwrap(),
            name: name.to_string(),
        };
        let a = Agent {
            account: Some(account("alice")),
            ..Agent::default()
        };
        let b = Agent {
            account: Some(account("alice")),
            ..Agent::default()
        };
        let c = Agent {
            account: Some(account("bob")),
            ..Agent::default()
        };
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }
}
