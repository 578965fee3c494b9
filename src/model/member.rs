use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{AppError, AppResult};

/// github user id - slack username
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub github: String,
    pub slack: String,
}

#[derive(Deserialize)]
struct MemberEntry {
    slack: Option<String>,
}

/// Members in the order they appear in `users.yaml`:
///
/// ```yaml
/// junho85:
///   slack: junho85
/// ```
#[derive(Debug, Clone, Default)]
pub struct Members(Vec<Member>);

impl Members {
    #[cfg(test)]
    pub fn new(members: Vec<Member>) -> Self {
        Self(members)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read members file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        let mapping: Mapping = serde_yaml::from_str(raw)
            .map_err(|e| AppError::Config(format!("invalid members file: {e}")))?;

        let mut members = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let github = match key {
                Value::String(s) => s,
                other => {
                    return Err(AppError::Config(format!(
                        "member id must be a string, got {other:?}"
                    )));
                }
            };

            // Without a slack name the github id is used for mentions
            let slack = match value {
                Value::Null => None,
                value => serde_yaml::from_value::<MemberEntry>(value)
                    .map_err(|e| AppError::Config(format!("invalid entry for {github}: {e}")))?
                    .slack,
            }
            .unwrap_or_else(|| github.clone());

            members.push(Member { github, slack });
        }

        Ok(Self(members))
    }

    pub fn get(&self, github: &str) -> Option<&Member> {
        self.0.iter().find(|m| m.github == github)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_file_order() {
        let members = Members::from_yaml(
            "zeta:\n  slack: z.slack\nalpha:\n  slack: a.slack\n",
        )
        .unwrap();

        let ids: Vec<_> = members.iter().map(|m| m.github.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha"]);
        assert_eq!(members.get("alpha").unwrap().slack, "a.slack");
    }

    #[test]
    fn missing_slack_name_falls_back_to_github_id() {
        let members = Members::from_yaml("junho85:\nkim:\n  slack:\n").unwrap();

        assert_eq!(members.get("junho85").unwrap().slack, "junho85");
        assert_eq!(members.get("kim").unwrap().slack, "kim");
    }

    #[test]
    fn rejects_non_mapping() {
        assert!(Members::from_yaml("- a\n- b\n").is_err());
    }
}
