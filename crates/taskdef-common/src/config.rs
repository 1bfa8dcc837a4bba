//! Run configuration: the four update strings of one invocation.

use serde::{Deserialize, Serialize};

use crate::types::UpdateKind;

/// The update strings applied to a task definition in one run.
///
/// An empty string means "no edits of this kind".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectiveSet {
    /// Image updates, e.g. `container=web,tag=2`.
    pub image: String,
    /// Environment variable updates, e.g. `container=web,name=A,value=1`.
    pub environment: String,
    /// Docker label updates, e.g. `container=web,team=core`.
    pub docker_labels: String,
    /// Secret updates, e.g. `container=web,name=DB,valueFrom=arn:...`.
    pub secrets: String,
}

impl DirectiveSet {
    /// Returns the update string for `kind`.
    #[must_use]
    pub fn get(&self, kind: UpdateKind) -> &str {
        match kind {
            UpdateKind::Image => &self.image,
            UpdateKind::Environment => &self.environment,
            UpdateKind::DockerLabel => &self.docker_labels,
            UpdateKind::Secret => &self.secrets,
        }
    }

    /// Yields each update string with its kind, in application order.
    pub fn in_apply_order(&self) -> impl Iterator<Item = (UpdateKind, &str)> {
        UpdateKind::APPLY_ORDER
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Whether every update string is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_apply_order().all(|(_, raw)| raw.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_empty() {
        assert!(DirectiveSet::default().is_empty());
    }

    #[test]
    fn in_apply_order_pairs_kinds_with_strings() {
        let set = DirectiveSet {
            image: "i".into(),
            environment: "e".into(),
            docker_labels: "l".into(),
            secrets: "s".into(),
        };
        let pairs: Vec<_> = set.in_apply_order().collect();
        assert_eq!(
            pairs,
            vec![
                (UpdateKind::Environment, "e"),
                (UpdateKind::DockerLabel, "l"),
                (UpdateKind::Secret, "s"),
                (UpdateKind::Image, "i"),
            ]
        );
    }

    #[test]
    fn deserializes_partial_json() {
        let set: DirectiveSet =
            serde_json::from_str(r#"{"image":"container=web,tag=2"}"#).expect("deserialize");
        assert_eq!(set.image, "container=web,tag=2");
        assert!(set.environment.is_empty());
        assert!(!set.is_empty());
    }
}
