//! Edit applier.
//!
//! Resolves each [`EditRecord`] against the [`ContainerIndex`] and edits the
//! container list in place. Existing entries are overwritten at their known
//! position; new entries are appended and registered in the index, so a
//! later edit of the same name in the same run updates instead of
//! duplicating. Nothing is ever removed or reordered. Image edits always
//! start from the image the container had before the run.

use std::collections::HashMap;

use serde_json::{Map, Value};
use taskdef_common::config::DirectiveSet;
use taskdef_common::constants::{
    DOCKER_LABELS_FIELD, ENVIRONMENT_FIELD, NAME_KEY, SECRETS_FIELD, VALUE_FROM_KEY, VALUE_KEY,
};
use taskdef_common::error::{Result, TaskDefError};
use taskdef_common::types::UpdateKind;
use taskdef_directive::{EditRecord, EnvEdit, ImageEdit, ImageMode, LabelEdit, SecretEdit};

use crate::descriptor::{ContainerSpec, TaskDescriptor, encode_containers};
use crate::image::ImageReference;
use crate::index::ContainerIndex;

/// Owns the container list of one run and applies edits to it.
#[derive(Debug, Clone)]
pub struct Editor {
    containers: Vec<ContainerSpec>,
    index: ContainerIndex,
}

impl Editor {
    /// Takes the container list out of a decoded descriptor and indexes it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::MalformedDescriptor`] if container names are
    /// empty or duplicated.
    pub fn new(descriptor: TaskDescriptor) -> Result<Self> {
        Self::from_containers(descriptor.into_containers())
    }

    /// Indexes a bare container list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::MalformedDescriptor`] if container names are
    /// empty or duplicated.
    pub fn from_containers(containers: Vec<ContainerSpec>) -> Result<Self> {
        let index = ContainerIndex::build(&containers)?;
        Ok(Self { containers, index })
    }

    /// Applies a single edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDefError::UnknownContainer`] if the record names a
    /// container that is not in the task definition, or
    /// [`TaskDefError::MalformedDescriptor`] if an `image` or `tag` edit
    /// targets a container without an image, or if the targeted collection
    /// has the wrong JSON type.
    pub fn apply(&mut self, record: &EditRecord) -> Result<()> {
        tracing::debug!(kind = %record.kind(), container = record.container(), "applying edit");
        match record {
            EditRecord::Image(edit) => self.apply_image(edit),
            EditRecord::Env(edit) => self.apply_env(edit),
            EditRecord::Label(edit) => self.apply_label(edit),
            EditRecord::Secret(edit) => self.apply_secret(edit),
        }
    }

    /// Applies edits in order, stopping at the first failure.
    ///
    /// Returns the number of edits applied.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Editor::apply`].
    pub fn apply_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a EditRecord>,
    ) -> Result<usize> {
        let mut applied = 0;
        for record in records {
            self.apply(record)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Current state of the container list.
    #[must_use]
    pub fn containers(&self) -> &[ContainerSpec] {
        &self.containers
    }

    /// Consumes the editor, returning the edited container list.
    #[must_use]
    pub fn into_containers(self) -> Vec<ContainerSpec> {
        self.containers
    }

    fn apply_image(&mut self, edit: &ImageEdit) -> Result<()> {
        let entry = self.index.resolve(&edit.container, UpdateKind::Image)?;
        let image = match edit.mode {
            ImageMode::ImageAndTag => edit.value.clone(),
            ImageMode::Image => original_image(entry.image.as_deref(), edit)?
                .with_repository(&edit.value),
            ImageMode::Tag => original_image(entry.image.as_deref(), edit)?.with_tag(&edit.value),
        };
        tracing::debug!(container = %edit.container, %image, "updated image");
        self.containers[entry.position].set_image(image);
        Ok(())
    }

    fn apply_env(&mut self, edit: &EnvEdit) -> Result<()> {
        let entry = self
            .index
            .resolve_mut(&edit.container, UpdateKind::Environment)?;
        let variables = self.containers[entry.position]
            .array_mut(ENVIRONMENT_FIELD)
            .ok_or_else(|| wrong_shape(&edit.container, ENVIRONMENT_FIELD, "an array"))?;
        upsert_named(
            variables,
            &mut entry.environment,
            &edit.name,
            VALUE_KEY,
            &edit.value,
        );
        Ok(())
    }

    fn apply_label(&mut self, edit: &LabelEdit) -> Result<()> {
        let entry = self
            .index
            .resolve_mut(&edit.container, UpdateKind::DockerLabel)?;
        let labels = self.containers[entry.position]
            .object_mut(DOCKER_LABELS_FIELD)
            .ok_or_else(|| wrong_shape(&edit.container, DOCKER_LABELS_FIELD, "an object"))?;
        if !entry.docker_labels.contains_key(&edit.key) {
            let _ = entry.docker_labels.insert(edit.key.clone(), labels.len());
        }
        let _ = labels.insert(edit.key.clone(), Value::String(edit.value.clone()));
        Ok(())
    }

    fn apply_secret(&mut self, edit: &SecretEdit) -> Result<()> {
        let entry = self.index.resolve_mut(&edit.container, UpdateKind::Secret)?;
        let secrets = self.containers[entry.position]
            .array_mut(SECRETS_FIELD)
            .ok_or_else(|| wrong_shape(&edit.container, SECRETS_FIELD, "an array"))?;
        upsert_named(
            secrets,
            &mut entry.secrets,
            &edit.name,
            VALUE_FROM_KEY,
            &edit.value_from,
        );
        Ok(())
    }
}

/// Overwrites `field` of the entry named `name`, or appends a new
/// `{name, field}` entry and records its position.
fn upsert_named(
    entries: &mut Vec<Value>,
    positions: &mut HashMap<String, usize>,
    name: &str,
    field: &str,
    value: &str,
) {
    let existing = positions
        .get(name)
        .and_then(|&position| entries.get_mut(position))
        .and_then(Value::as_object_mut);
    if let Some(entry) = existing {
        let _ = entry.insert(field.to_owned(), Value::from(value));
        return;
    }
    let _ = positions.insert(name.to_owned(), entries.len());
    let mut entry = Map::new();
    let _ = entry.insert(NAME_KEY.to_owned(), Value::from(name));
    let _ = entry.insert(field.to_owned(), Value::from(value));
    entries.push(Value::Object(entry));
}

fn original_image<'a>(image: Option<&'a str>, edit: &ImageEdit) -> Result<ImageReference<'a>> {
    image.map(ImageReference::parse).ok_or_else(|| {
        TaskDefError::malformed(format!(
            "container \"{}\" has no image for a `{}` update",
            edit.container, edit.mode
        ))
    })
}

fn wrong_shape(container: &str, field: &str, expected: &str) -> TaskDefError {
    TaskDefError::malformed(format!(
        "`{field}` of container \"{container}\" is not {expected}"
    ))
}

/// Decodes `document`, applies the four update strings in application
/// order, and returns the edited container list.
///
/// Each update string is parsed in full before any of its records is
/// applied.
///
/// # Errors
///
/// Returns the first [`TaskDefError`] raised while decoding, parsing, or
/// applying; no partial result is produced.
pub fn update_container_definitions(
    document: &str,
    directives: &DirectiveSet,
) -> Result<Vec<ContainerSpec>> {
    tracing::info!("updating container definitions");
    let descriptor = TaskDescriptor::from_json(document)?;
    let mut editor = Editor::new(descriptor)?;

    for (kind, raw) in directives.in_apply_order() {
        let records = taskdef_directive::parse_updates(kind, raw)?;
        let applied = editor.apply_all(&records)?;
        tracing::info!(%kind, applied, "applied update string");
    }

    Ok(editor.into_containers())
}

/// [`update_container_definitions`], encoded back to JSON.
///
/// # Errors
///
/// Returns the first [`TaskDefError`] raised while decoding, parsing,
/// applying, or encoding.
pub fn update_container_definitions_json(
    document: &str,
    directives: &DirectiveSet,
    pretty: bool,
) -> Result<String> {
    let containers = update_container_definitions(document, directives)?;
    encode_containers(&containers, pretty)
}
