//! `taskdef update` — Apply update directives to the container definitions.

use clap::Args;
use taskdef_common::config::DirectiveSet;
use taskdef_common::constants::{
    ENV_DOCKER_LABEL_UPDATES, ENV_ENV_UPDATES, ENV_IMAGE_UPDATES, ENV_SECRET_UPDATES,
};

use super::DescriptorArgs;

/// Arguments for the `update` subcommand.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Source of the task definition.
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Image updates: `container=<name>,image-and-tag|image|tag=<value>,...`.
    #[arg(long, env = ENV_IMAGE_UPDATES, default_value = "")]
    pub image_updates: String,

    /// Environment variable updates: `container=<name>,name=<var>,value=<value>,...`.
    #[arg(long, env = ENV_ENV_UPDATES, default_value = "")]
    pub env_updates: String,

    /// Docker label updates: `container=<name>,<label>=<value>,...`.
    #[arg(long, env = ENV_DOCKER_LABEL_UPDATES, default_value = "")]
    pub docker_label_updates: String,

    /// Secret updates: `container=<name>,name=<secret>,valueFrom=<arn>,...`.
    #[arg(long, env = ENV_SECRET_UPDATES, default_value = "")]
    pub secret_updates: String,

    /// Pretty-print the resulting JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl UpdateArgs {
    /// Collects the four update strings.
    #[must_use]
    pub fn directives(&self) -> DirectiveSet {
        DirectiveSet {
            image: self.image_updates.clone(),
            environment: self.env_updates.clone(),
            docker_labels: self.docker_label_updates.clone(),
            secrets: self.secret_updates.clone(),
        }
    }
}

/// Executes the `update` command.
///
/// # Errors
///
/// Returns an error if the task definition cannot be read or decoded, or if
/// any update string is malformed or names an unknown container.
pub fn execute(args: &UpdateArgs) -> anyhow::Result<()> {
    let document = args.descriptor.read()?;
    let directives = args.directives();
    if directives.is_empty() {
        tracing::info!("no update directives given; container definitions pass through");
    }

    let json = taskdef_core::update_container_definitions_json(&document, &directives, args.pretty)?;
    crate::output::emit(&json)
}
