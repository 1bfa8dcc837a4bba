//! Container lookup tables built once per run.
//!
//! Positions recorded here stay valid for the whole run because edits only
//! overwrite values in place or append after existing entries. The image
//! recorded here is the one decoded from the document and is never updated.

use std::collections::HashMap;

use taskdef_common::constants::{ENVIRONMENT_FIELD, SECRETS_FIELD};
use taskdef_common::error::{Result, TaskDefError};
use taskdef_common::types::UpdateKind;

use crate::descriptor::ContainerSpec;

/// Lookups for one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerEntry {
    /// Position in `containerDefinitions`.
    pub position: usize,
    /// Image reference as decoded, before any edit.
    pub image: Option<String>,
    /// Environment variable name to position.
    pub environment: HashMap<String, usize>,
    /// Docker label key to position.
    pub docker_labels: HashMap<String, usize>,
    /// Secret name to position.
    pub secrets: HashMap<String, usize>,
}

impl ContainerEntry {
    fn from_spec(position: usize, spec: &ContainerSpec) -> Self {
        Self {
            position,
            image: spec.image().map(str::to_owned),
            environment: positions(spec.named_entries(ENVIRONMENT_FIELD)),
            docker_labels: positions(spec.label_keys()),
            secrets: positions(spec.named_entries(SECRETS_FIELD)),
        }
    }
}

fn positions<'a>(names: impl Iterator<Item = (usize, &'a str)>) -> HashMap<String, usize> {
    names
        .map(|(position, name)| (name.to_owned(), position))
        .collect()
}

/// Container name to [`ContainerEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerIndex {
    entries: HashMap<String, ContainerEntry>,
}

impl ContainerIndex {
    /// Indexes a container list in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::MalformedDescriptor`] if a container name is
    /// empty or appears twice.
    pub fn build(containers: &[ContainerSpec]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(containers.len());
        for (position, spec) in containers.iter().enumerate() {
            let name = match spec.name() {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(TaskDefError::malformed(format!(
                        "container at position {position} has an empty name"
                    )));
                }
            };
            if entries
                .insert(name.to_owned(), ContainerEntry::from_spec(position, spec))
                .is_some()
            {
                return Err(TaskDefError::malformed(format!(
                    "duplicate container name: \"{name}\""
                )));
            }
        }
        tracing::debug!(containers = entries.len(), "indexed container definitions");
        Ok(Self { entries })
    }

    /// Looks up a container named by an update of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::UnknownContainer`] if no container has that name.
    pub fn resolve(&self, container: &str, kind: UpdateKind) -> Result<&ContainerEntry> {
        self.entries
            .get(container)
            .ok_or_else(|| unknown(container, kind))
    }

    /// Mutable variant of [`ContainerIndex::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::UnknownContainer`] if no container has that name.
    pub fn resolve_mut(&mut self, container: &str, kind: UpdateKind) -> Result<&mut ContainerEntry> {
        self.entries
            .get_mut(container)
            .ok_or_else(|| unknown(container, kind))
    }

    /// Whether a container with this name exists.
    #[must_use]
    pub fn contains(&self, container: &str) -> bool {
        self.entries.contains_key(container)
    }

    /// Number of indexed containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unknown(container: &str, kind: UpdateKind) -> TaskDefError {
    TaskDefError::UnknownContainer {
        container: container.to_owned(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn web() -> ContainerSpec {
        serde_json::from_value(json!({
            "name": "web",
            "image": "nginx:1.0",
            "environment": [
                {"name": "A", "value": "1"},
                {"name": "B", "value": 2}
            ],
            "dockerLabels": {"team": "core", "tier": "web"},
            "secrets": [{"name": "S", "valueFrom": "arn:s"}]
        }))
        .expect("decode")
    }

    #[test]
    fn build_records_positions() {
        let containers = vec![ContainerSpec::new("sidecar", "envoy:1"), web()];
        let index = ContainerIndex::build(&containers).expect("build");
        assert_eq!(index.len(), 2);

        let entry = index.resolve("web", UpdateKind::Environment).expect("resolve");
        assert_eq!(entry.position, 1);
        assert_eq!(entry.image.as_deref(), Some("nginx:1.0"));
        assert_eq!(entry.environment.get("B"), Some(&1));
        assert_eq!(entry.docker_labels.get("tier"), Some(&1));
        assert_eq!(entry.secrets.get("S"), Some(&0));
    }

    #[test]
    fn sub_indices_are_independent() {
        let index = ContainerIndex::build(&[web()]).expect("build");
        let entry = index.resolve("web", UpdateKind::Secret).expect("resolve");
        assert!(!entry.secrets.contains_key("A"));
        assert!(!entry.environment.contains_key("team"));
    }

    #[test]
    fn container_without_collections_has_empty_maps() {
        let index = ContainerIndex::build(&[ContainerSpec::new("web", "app:1")]).expect("build");
        let entry = index.resolve("web", UpdateKind::Image).expect("resolve");
        assert!(entry.environment.is_empty());
        assert!(entry.docker_labels.is_empty());
        assert!(entry.secrets.is_empty());
    }

    #[test]
    fn resolve_unknown_container_fails() {
        let index = ContainerIndex::build(&[web()]).expect("build");
        let err = index.resolve("ghost", UpdateKind::Image).unwrap_err();
        assert!(err.to_string().contains("ghost"), "got: {err}");
        assert!(!index.contains("ghost"));
    }

    #[test]
    fn duplicate_names_are_malformed() {
        let containers = vec![ContainerSpec::new("web", "a"), ContainerSpec::new("web", "b")];
        let err = ContainerIndex::build(&containers).unwrap_err();
        assert!(err.to_string().contains("duplicate container name"), "got: {err}");
    }

    #[test]
    fn empty_name_is_malformed() {
        let err = ContainerIndex::build(&[ContainerSpec::new("", "a")]).unwrap_err();
        assert!(matches!(err, TaskDefError::MalformedDescriptor { .. }));
    }

    #[test]
    fn non_string_image_is_not_indexed() {
        let spec: ContainerSpec =
            serde_json::from_value(json!({"name": "web", "image": 7})).expect("decode");
        let index = ContainerIndex::build(&[spec]).expect("build");
        let entry = index.resolve("web", UpdateKind::Image).expect("resolve");
        assert_eq!(entry.image, None);
    }

    #[test]
    fn empty_container_list_builds_empty_index() {
        let index = ContainerIndex::build(&[]).expect("build");
        assert!(index.is_empty());
    }
}
