//! Reserved directive keys, field-format tables, and names.

/// Anchor key that opens every directive record.
pub const ANCHOR_KEY: &str = "container";

/// Image mode replacing the whole image reference.
pub const IMAGE_AND_TAG_KEY: &str = "image-and-tag";
/// Image mode replacing the repository and keeping the tag.
pub const IMAGE_KEY: &str = "image";
/// Image mode replacing the tag and keeping the repository.
pub const TAG_KEY: &str = "tag";

/// Key naming an environment variable or secret.
pub const NAME_KEY: &str = "name";
/// Key carrying an environment variable value.
pub const VALUE_KEY: &str = "value";
/// Key carrying a secret reference.
pub const VALUE_FROM_KEY: &str = "valueFrom";

/// Container field holding the image reference.
pub const IMAGE_FIELD: &str = "image";
/// Container field holding the `{name, value}` list.
pub const ENVIRONMENT_FIELD: &str = "environment";
/// Container field holding the label object.
pub const DOCKER_LABELS_FIELD: &str = "dockerLabels";
/// Container field holding the `{name, valueFrom}` list.
pub const SECRETS_FIELD: &str = "secrets";

/// Task definition fields holding a list of strings, printed space-joined.
pub const STRING_LIST_FIELDS: &[&str] = &["requiresCompatibilities"];
/// Task definition fields holding a JSON array, defaulting to `[]`.
pub const JSON_ARRAY_FIELDS: &[&str] = &["placementConstraints", "volumes", "tags"];
/// Task definition fields holding a JSON object, defaulting to `{}`.
pub const JSON_OBJECT_FIELDS: &[&str] = &["proxyConfiguration", "runtimePlatform"];
/// Field read from the document root instead of `taskDefinition`.
pub const ROOT_TAGS_FIELD: &str = "tags";

/// Environment variable consulted for the task definition JSON.
pub const ENV_TASK_DEFINITION: &str = "TASKDEF_TASK_DEFINITION";
/// Environment variable consulted for image updates.
pub const ENV_IMAGE_UPDATES: &str = "TASKDEF_IMAGE_UPDATES";
/// Environment variable consulted for environment variable updates.
pub const ENV_ENV_UPDATES: &str = "TASKDEF_ENV_UPDATES";
/// Environment variable consulted for docker label updates.
pub const ENV_DOCKER_LABEL_UPDATES: &str = "TASKDEF_DOCKER_LABEL_UPDATES";
/// Environment variable consulted for secret updates.
pub const ENV_SECRET_UPDATES: &str = "TASKDEF_SECRET_UPDATES";
