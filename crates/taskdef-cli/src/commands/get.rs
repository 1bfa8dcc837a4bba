//! `taskdef get` — Print a single task definition field.

use clap::Args;

use super::DescriptorArgs;

/// Arguments for the `get` subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Field of `taskDefinition` to print (`tags` is read from the document root).
    pub field: String,

    /// Source of the task definition.
    #[command(flatten)]
    pub descriptor: DescriptorArgs,
}

/// Executes the `get` command.
///
/// # Errors
///
/// Returns an error if the task definition cannot be read or has no
/// `taskDefinition` object.
pub fn execute(args: &GetArgs) -> anyhow::Result<()> {
    let document = args.descriptor.read()?;
    let value = taskdef_core::extract_field(&document, &args.field)?;
    crate::output::emit(&value)
}
