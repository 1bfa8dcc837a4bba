//! Update-string parser built on the `nom` lexer.
//!
//! Every update string shares one shape: an anchor `container=<name>`
//! followed by one or two `key=value` fields. A [`Grammar`] describes which
//! fields a kind accepts; the scanner drives the tokens through the
//! `ExpectAnchor` -> `ExpectField1` -> `ExpectField2` states and fails on
//! the first token that does not fit.

pub mod ast;
pub mod lexer;

use taskdef_common::config::DirectiveSet;
use taskdef_common::constants::{ANCHOR_KEY, NAME_KEY, VALUE_FROM_KEY, VALUE_KEY};
use taskdef_common::error::{Result, TaskDefError};
use taskdef_common::types::UpdateKind;

use self::ast::{EditRecord, EnvEdit, ImageEdit, ImageMode, LabelEdit, SecretEdit};
use self::lexer::Token;

/// Outcome of feeding the first field of a record to a grammar.
enum Step<R> {
    /// The record is complete.
    Done(R),
    /// The record needs a second field; carries the first field's value.
    Next(String),
}

/// Field layout of one update kind.
trait Grammar {
    /// Record produced for each anchor.
    type Record;

    /// Update string this grammar parses.
    const KIND: UpdateKind;

    /// Accepts the field right after the anchor.
    fn field1(container: String, key: &str, value: String)
    -> std::result::Result<Step<Self::Record>, String>;

    /// Accepts the second field, for two-field grammars.
    fn field2(
        container: String,
        field1: String,
        key: &str,
        value: String,
    ) -> std::result::Result<Self::Record, String> {
        let _ = (container, field1, value);
        Err(format!("unexpected second field `{key}`"))
    }
}

struct ImageGrammar;

impl Grammar for ImageGrammar {
    type Record = ImageEdit;
    const KIND: UpdateKind = UpdateKind::Image;

    fn field1(
        container: String,
        key: &str,
        value: String,
    ) -> std::result::Result<Step<ImageEdit>, String> {
        let mode: ImageMode = key.parse()?;
        Ok(Step::Done(ImageEdit {
            container,
            mode,
            value,
        }))
    }
}

struct EnvGrammar;

impl Grammar for EnvGrammar {
    type Record = EnvEdit;
    const KIND: UpdateKind = UpdateKind::Environment;

    fn field1(
        _container: String,
        key: &str,
        value: String,
    ) -> std::result::Result<Step<EnvEdit>, String> {
        expect_key(key, NAME_KEY)?;
        Ok(Step::Next(value))
    }

    fn field2(
        container: String,
        name: String,
        key: &str,
        value: String,
    ) -> std::result::Result<EnvEdit, String> {
        expect_key(key, VALUE_KEY)?;
        Ok(EnvEdit {
            container,
            name,
            value,
        })
    }
}

struct LabelGrammar;

impl Grammar for LabelGrammar {
    type Record = LabelEdit;
    const KIND: UpdateKind = UpdateKind::DockerLabel;

    fn field1(
        container: String,
        key: &str,
        value: String,
    ) -> std::result::Result<Step<LabelEdit>, String> {
        if key.is_empty() {
            return Err("empty docker label key".into());
        }
        if key == ANCHOR_KEY {
            return Err(format!(
                "expected a label for container `{container}`, got another `{ANCHOR_KEY}=`"
            ));
        }
        Ok(Step::Done(LabelEdit {
            container,
            key: key.to_owned(),
            value,
        }))
    }
}

struct SecretGrammar;

impl Grammar for SecretGrammar {
    type Record = SecretEdit;
    const KIND: UpdateKind = UpdateKind::Secret;

    fn field1(
        _container: String,
        key: &str,
        value: String,
    ) -> std::result::Result<Step<SecretEdit>, String> {
        expect_key(key, NAME_KEY)?;
        Ok(Step::Next(value))
    }

    fn field2(
        container: String,
        name: String,
        key: &str,
        value: String,
    ) -> std::result::Result<SecretEdit, String> {
        expect_key(key, VALUE_FROM_KEY)?;
        Ok(SecretEdit {
            container,
            name,
            value_from: value,
        })
    }
}

fn expect_key(key: &str, expected: &str) -> std::result::Result<(), String> {
    if key == expected {
        Ok(())
    } else {
        Err(format!("expected `{expected}=`, got `{key}=`"))
    }
}

/// Scanner position within a directive record.
enum State {
    ExpectAnchor,
    ExpectField1 { container: String },
    ExpectField2 { container: String, field1: String },
}

fn scan<G: Grammar>(raw: &str) -> Result<Vec<G::Record>> {
    let fail = |reason: String| TaskDefError::directive(G::KIND, reason, raw);

    let tokens = lexer::tokenize(raw).map_err(fail)?;
    let mut records = Vec::new();
    let mut state = State::ExpectAnchor;

    for token in tokens {
        state = match (state, token) {
            (State::ExpectAnchor, Token::Blank) => State::ExpectAnchor,
            (State::ExpectAnchor, Token::Pair { key, value }) if key == ANCHOR_KEY => {
                if value.is_empty() {
                    return Err(fail(format!("empty `{ANCHOR_KEY}=` value")));
                }
                State::ExpectField1 { container: value }
            }
            (State::ExpectAnchor, other) => {
                return Err(fail(format!(
                    "expected `{ANCHOR_KEY}=<name>`, got {other}"
                )));
            }
            (State::ExpectField1 { container }, Token::Pair { key, value }) => {
                match G::field1(container.clone(), &key, value).map_err(fail)? {
                    Step::Done(record) => {
                        records.push(record);
                        State::ExpectAnchor
                    }
                    Step::Next(field1) => State::ExpectField2 { container, field1 },
                }
            }
            (State::ExpectField2 { container, field1 }, Token::Pair { key, value }) => {
                records.push(G::field2(container, field1, &key, value).map_err(fail)?);
                State::ExpectAnchor
            }
            (
                State::ExpectField1 { container } | State::ExpectField2 { container, .. },
                other,
            ) => {
                return Err(fail(format!(
                    "expected a `key=value` field for container `{container}`, got {other}"
                )));
            }
        };
    }

    match state {
        State::ExpectAnchor => Ok(records),
        State::ExpectField1 { container } | State::ExpectField2 { container, .. } => Err(fail(
            format!("directive for container `{container}` is incomplete"),
        )),
    }
}

/// Parses image updates: `container=<c>,image-and-tag|image|tag=<v>,...`.
///
/// A blank string yields no records.
///
/// # Errors
///
/// Returns [`TaskDefError::DirectiveFormat`] if the string is non-blank but
/// has no `container=` anchor, or violates the grammar.
pub fn parse_image_updates(raw: &str) -> Result<Vec<ImageEdit>> {
    if !raw.trim().is_empty() && !raw.contains("container=") {
        return Err(TaskDefError::directive(
            UpdateKind::Image,
            "the container parameter is required",
            raw,
        ));
    }
    scan::<ImageGrammar>(raw)
}

/// Parses environment updates: `container=<c>,name=<n>,value=<v>,...`.
///
/// # Errors
///
/// Returns [`TaskDefError::DirectiveFormat`] if the string violates the grammar.
pub fn parse_environment_updates(raw: &str) -> Result<Vec<EnvEdit>> {
    scan::<EnvGrammar>(raw)
}

/// Parses docker label updates: `container=<c>,<key>=<value>,...`.
///
/// # Errors
///
/// Returns [`TaskDefError::DirectiveFormat`] if the string violates the grammar.
pub fn parse_docker_label_updates(raw: &str) -> Result<Vec<LabelEdit>> {
    scan::<LabelGrammar>(raw)
}

/// Parses secret updates: `container=<c>,name=<n>,valueFrom=<v>,...`.
///
/// # Errors
///
/// Returns [`TaskDefError::DirectiveFormat`] if the string violates the grammar.
pub fn parse_secret_updates(raw: &str) -> Result<Vec<SecretEdit>> {
    scan::<SecretGrammar>(raw)
}

/// Parses one update string of the given kind into edit records.
///
/// # Errors
///
/// Returns [`TaskDefError::DirectiveFormat`] if the string violates the grammar.
pub fn parse_updates(kind: UpdateKind, raw: &str) -> Result<Vec<EditRecord>> {
    tracing::debug!(%kind, directive = raw, "parsing update string");
    let records = match kind {
        UpdateKind::Image => into_records(parse_image_updates(raw)?),
        UpdateKind::Environment => into_records(parse_environment_updates(raw)?),
        UpdateKind::DockerLabel => into_records(parse_docker_label_updates(raw)?),
        UpdateKind::Secret => into_records(parse_secret_updates(raw)?),
    };
    Ok(records)
}

fn into_records<T: Into<EditRecord>>(edits: Vec<T>) -> Vec<EditRecord> {
    edits.into_iter().map(Into::into).collect()
}

/// Parses all four update strings, in application order.
///
/// # Errors
///
/// Returns the first [`TaskDefError::DirectiveFormat`] encountered.
pub fn parse_directive_set(set: &DirectiveSet) -> Result<Vec<EditRecord>> {
    tracing::info!("parsing update directives");
    let mut records = Vec::new();
    for (kind, raw) in set.in_apply_order() {
        records.extend(parse_updates(kind, raw)?);
    }
    Ok(records)
}
