//! # taskdef-core
//!
//! Task definition model and the merge engine that applies parsed update
//! directives to it.
//!
//! Handles:
//! - **Descriptor**: Decoding and re-encoding the task definition document.
//! - **Index**: Container name to position lookups built once per run.
//! - **Image**: Splitting and rewriting `repository[:tag]` references.
//! - **Apply**: Positional, append-only edits of the container list.
//! - **Extract**: Single-field formatting of a task definition.

pub mod apply;
pub mod descriptor;
pub mod extract;
pub mod image;
pub mod index;

pub use apply::{Editor, update_container_definitions, update_container_definitions_json};
pub use descriptor::{ContainerSpec, TaskDefinition, TaskDescriptor};
pub use extract::extract_field;
pub use index::{ContainerEntry, ContainerIndex};
