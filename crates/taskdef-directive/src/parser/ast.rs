//! Edit records produced by the directive parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskdef_common::constants::{IMAGE_AND_TAG_KEY, IMAGE_KEY, TAG_KEY};
use taskdef_common::types::UpdateKind;

/// How an image edit rewrites the existing reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageMode {
    /// Replace the whole `repository[:tag]` reference.
    ImageAndTag,
    /// Replace the repository, keep the tag.
    Image,
    /// Replace the tag, keep the repository.
    Tag,
}

impl FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            IMAGE_AND_TAG_KEY => Ok(Self::ImageAndTag),
            IMAGE_KEY => Ok(Self::Image),
            TAG_KEY => Ok(Self::Tag),
            other => Err(format!(
                "expected `{IMAGE_AND_TAG_KEY}`, `{IMAGE_KEY}`, or `{TAG_KEY}`, got `{other}`"
            )),
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageAndTag => f.write_str(IMAGE_AND_TAG_KEY),
            Self::Image => f.write_str(IMAGE_KEY),
            Self::Tag => f.write_str(TAG_KEY),
        }
    }
}

/// `container=<c>,image-and-tag|image|tag=<value>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEdit {
    /// Target container name.
    pub container: String,
    /// Which part of the reference changes.
    pub mode: ImageMode,
    /// New image, repository, or tag.
    pub value: String,
}

/// `container=<c>,name=<n>,value=<v>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEdit {
    /// Target container name.
    pub container: String,
    /// Environment variable name.
    pub name: String,
    /// New value.
    pub value: String,
}

/// `container=<c>,<key>=<value>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEdit {
    /// Target container name.
    pub container: String,
    /// Docker label key.
    pub key: String,
    /// New label value.
    pub value: String,
}

/// `container=<c>,name=<n>,valueFrom=<v>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEdit {
    /// Target container name.
    pub container: String,
    /// Secret name as exposed to the container.
    pub name: String,
    /// Secret reference.
    pub value_from: String,
}

/// One parsed directive: a target container and a single field-level change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EditRecord {
    /// Image reference change.
    Image(ImageEdit),
    /// Environment variable upsert.
    Env(EnvEdit),
    /// Docker label upsert.
    Label(LabelEdit),
    /// Secret upsert.
    Secret(SecretEdit),
}

impl EditRecord {
    /// Name of the container this record targets.
    #[must_use]
    pub fn container(&self) -> &str {
        match self {
            Self::Image(edit) => &edit.container,
            Self::Env(edit) => &edit.container,
            Self::Label(edit) => &edit.container,
            Self::Secret(edit) => &edit.container,
        }
    }

    /// Update string this record came from.
    #[must_use]
    pub const fn kind(&self) -> UpdateKind {
        match self {
            Self::Image(_) => UpdateKind::Image,
            Self::Env(_) => UpdateKind::Environment,
            Self::Label(_) => UpdateKind::DockerLabel,
            Self::Secret(_) => UpdateKind::Secret,
        }
    }
}

impl From<ImageEdit> for EditRecord {
    fn from(edit: ImageEdit) -> Self {
        Self::Image(edit)
    }
}

impl From<EnvEdit> for EditRecord {
    fn from(edit: EnvEdit) -> Self {
        Self::Env(edit)
    }
}

impl From<LabelEdit> for EditRecord {
    fn from(edit: LabelEdit) -> Self {
        Self::Label(edit)
    }
}

impl From<SecretEdit> for EditRecord {
    fn from(edit: SecretEdit) -> Self {
        Self::Secret(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mode_parses_known_tokens() {
        assert_eq!("image-and-tag".parse::<ImageMode>(), Ok(ImageMode::ImageAndTag));
        assert_eq!("image".parse::<ImageMode>(), Ok(ImageMode::Image));
        assert_eq!("tag".parse::<ImageMode>(), Ok(ImageMode::Tag));
    }

    #[test]
    fn image_mode_rejects_unknown_token() {
        let err = "digest".parse::<ImageMode>().unwrap_err();
        assert!(err.contains("digest"), "got: {err}");
    }

    #[test]
    fn record_reports_container_and_kind() {
        let record = EditRecord::from(SecretEdit {
            container: "web".into(),
            name: "DB".into(),
            value_from: "arn:db".into(),
        });
        assert_eq!(record.container(), "web");
        assert_eq!(record.kind(), UpdateKind::Secret);
    }

    #[test]
    fn record_serializes_with_kind_tag() {
        let record = EditRecord::from(ImageEdit {
            container: "web".into(),
            mode: ImageMode::Tag,
            value: "2".into(),
        });
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["kind"], "image");
        assert_eq!(json["mode"], "tag");
    }
}
