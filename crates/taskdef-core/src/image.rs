//! `repository[:tag]` image references.

use std::fmt;

/// A borrowed image reference split into repository and optional tag.
///
/// The tag separator is the last `:` that is not followed by a `/`, so a
/// registry port (`registry:5000/app`) stays part of the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// Everything before the tag separator.
    pub repository: &'a str,
    /// Text after the tag separator, if any.
    pub tag: Option<&'a str>,
}

impl<'a> ImageReference<'a> {
    /// Splits `image` into repository and tag.
    ///
    /// With a single colon this is the same as splitting at the first `:`.
    /// With several (`host:5000/app:1`) the split is at the last one, so
    /// `host:5000/app` is the repository and `1` the tag.
    #[must_use]
    pub fn parse(image: &'a str) -> Self {
        match image.rsplit_once(':') {
            Some((repository, tag)) if !tag.contains('/') => Self {
                repository,
                tag: Some(tag),
            },
            _ => Self {
                repository: image,
                tag: None,
            },
        }
    }

    /// Replaces the repository, keeping the existing tag.
    #[must_use]
    pub fn with_repository(self, repository: &str) -> String {
        match self.tag {
            Some(tag) => format!("{repository}:{tag}"),
            None => repository.to_owned(),
        }
    }

    /// Replaces the tag, keeping the existing repository.
    #[must_use]
    pub fn with_tag(self, tag: &str) -> String {
        format!("{}:{tag}", self.repository)
    }
}

impl fmt::Display for ImageReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{}:{tag}", self.repository),
            None => f.write_str(self.repository),
        }
    }
}
