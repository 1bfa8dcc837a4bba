//! # taskdef-directive
//!
//! Parser for the four container update strings.
//!
//! Handles:
//! - **Lexer**: Splitting a raw update string into `key=value` tokens.
//! - **Parser**: Grouping tokens into per-container edit records through an
//!   explicit `ExpectAnchor` / `ExpectField1` / `ExpectField2` state machine.
//! - **AST**: The edit records handed to the applier.
//!
//! Parsing does not consult the task definition; container names are
//! resolved later, when the records are applied.

pub mod parser;

pub use parser::ast::{EditRecord, EnvEdit, ImageEdit, ImageMode, LabelEdit, SecretEdit};
pub use parser::{
    parse_directive_set, parse_docker_label_updates, parse_environment_updates,
    parse_image_updates, parse_secret_updates, parse_updates,
};
