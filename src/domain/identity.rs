//! Local git identity reconciliation
//!
//! Before committing, the local `user.name` / `user.email` must be set. Missing
//! pieces are filled from the review host's authenticated user; values that
//! are already configured are never overwritten.

use serde::Deserialize;

/// Identity reported by the review host
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitIdentity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A single `git config <key> <value>` write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSet {
    pub key: &'static str,
    pub value: String,
}

/// True when either local value is empty and the host must be consulted
pub fn needs_lookup(current_name: &str, current_email: &str) -> bool {
    current_name.trim().is_empty() || current_email.trim().is_empty()
}

/// Config writes needed to complete the local identity
///
/// Only empty local values are filled, and only with non-empty fetched values.
pub fn identity_updates(
    current_name: &str,
    current_email: &str,
    fetched: &GitIdentity,
) -> Vec<ConfigSet> {
    let mut updates = Vec::new();

    let pieces = [
        ("user.name", current_name, fetched.name.as_deref()),
        ("user.email", current_email, fetched.email.as_deref()),
    ];

    for (key, current, remote) in pieces {
        if !current.trim().is_empty() {
            continue;
        }
        if let Some(value) = remote.map(str::trim).filter(|v| !v.is_empty()) {
            updates.push(ConfigSet {
                key,
                value: value.to_string(),
            });
        }
    }

    updates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octocat() -> GitIdentity {
        GitIdentity {
            name: Some("The Octocat".to_string()),
            email: Some("octocat@github.com".to_string()),
        }
    }

    #[test]
    fn test_complete_identity_needs_nothing() {
        assert!(!needs_lookup("Jane", "jane@example.com"));
        assert!(identity_updates("Jane", "jane@example.com", &octocat()).is_empty());
    }

    #[test]
    fn test_fills_only_missing_email() {
        let updates = identity_updates("Jane", "", &octocat());
        assert_eq!(
            updates,
            vec![ConfigSet {
                key: "user.email",
                value: "octocat@github.com".to_string()
            }]
        );
    }

    #[test]
    fn test_fills_both_when_empty() {
        assert!(needs_lookup("", "\n"));
        let updates = identity_updates("", "\n", &octocat());
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].key, "user.name");
        assert_eq!(updates[1].key, "user.email");
    }

    #[test]
    fn test_skips_values_host_does_not_have() {
        let fetched = GitIdentity {
            name: Some("The Octocat".to_string()),
            email: None,
        };
        let updates = identity_updates("", "", &fetched);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].key, "user.name");
    }
}
