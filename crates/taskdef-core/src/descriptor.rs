//! Task definition document model.
//!
//! Containers are kept as raw JSON objects. The editor only reads and writes
//! the few paths it targets; every other key, value, `null`, and key order is
//! written back exactly as decoded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskdef_common::constants::{DOCKER_LABELS_FIELD, IMAGE_FIELD, NAME_KEY};
use taskdef_common::error::{Result, TaskDefError};

/// Root document, as returned by `describe-task-definition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    /// The task definition proper.
    pub task_definition: TaskDefinition,
    /// Fields outside `taskDefinition`, such as `tags`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `taskDefinition` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Ordered container list.
    pub container_definitions: Vec<ContainerSpec>,
    /// Task-level fields the editor never touches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `containerDefinitions`, kept as the decoded JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerSpec(Map<String, Value>);

impl ContainerSpec {
    /// Creates a container with only a name and an image.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        let mut fields = Map::new();
        let _ = fields.insert(NAME_KEY.to_owned(), Value::String(name.into()));
        let _ = fields.insert(IMAGE_FIELD.to_owned(), Value::String(image.into()));
        Self(fields)
    }

    /// Container name, if it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    /// Image reference, if it is a string.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.0.get(IMAGE_FIELD).and_then(Value::as_str)
    }

    /// Raw value of any container field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Overwrites the image reference, keeping the key's position.
    pub fn set_image(&mut self, image: String) {
        let _ = self.0.insert(IMAGE_FIELD.to_owned(), Value::String(image));
    }

    /// Positions and names of the `{name, ...}` objects in an array field.
    ///
    /// Entries without a string `name` keep their slot but are skipped.
    pub fn named_entries(&self, field: &str) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(position, entry)| {
                entry
                    .get(NAME_KEY)
                    .and_then(Value::as_str)
                    .map(|name| (position, name))
            })
    }

    /// Positions and keys of `dockerLabels`.
    pub fn label_keys(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .get(DOCKER_LABELS_FIELD)
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(position, (key, _))| (position, key.as_str()))
    }

    /// The array under `field`, created when missing or `null`.
    ///
    /// Returns `None` if the field holds something other than an array.
    pub fn array_mut(&mut self, field: &str) -> Option<&mut Vec<Value>> {
        match self.slot(field, || Value::Array(Vec::new())) {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The object under `field`, created when missing or `null`.
    ///
    /// Returns `None` if the field holds something other than an object.
    pub fn object_mut(&mut self, field: &str) -> Option<&mut Map<String, Value>> {
        match self.slot(field, || Value::Object(Map::new())) {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    fn slot(&mut self, field: &str, empty: impl FnOnce() -> Value) -> &mut Value {
        let slot = self.0.entry(field).or_insert(Value::Null);
        if slot.is_null() {
            *slot = empty();
        }
        slot
    }
}

impl TaskDescriptor {
    /// Decodes a task definition document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::MalformedDescriptor`] if the text is not JSON,
    /// lacks `taskDefinition.containerDefinitions`, or holds a container
    /// that is not an object with a string `name`.
    pub fn from_json(input: &str) -> Result<Self> {
        let descriptor: Self =
            serde_json::from_str(input).map_err(|e| TaskDefError::malformed(e.to_string()))?;
        if let Some(position) = descriptor
            .containers()
            .iter()
            .position(|spec| spec.name().is_none())
        {
            return Err(TaskDefError::malformed(format!(
                "container at position {position} has no string `name`"
            )));
        }
        Ok(descriptor)
    }

    /// The container list.
    #[must_use]
    pub fn containers(&self) -> &[ContainerSpec] {
        &self.task_definition.container_definitions
    }

    /// Consumes the document, keeping only the container list.
    #[must_use]
    pub fn into_containers(self) -> Vec<ContainerSpec> {
        self.task_definition.container_definitions
    }
}

/// Encodes a container list as JSON.
///
/// # Errors
///
/// Returns [`TaskDefError::Serialization`] if encoding fails.
pub fn encode_containers(containers: &[ContainerSpec], pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(containers)?
    } else {
        serde_json::to_string(containers)?
    };
    Ok(text)
}
