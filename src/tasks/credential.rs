//! Task: copy the optional credential into the install.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::credential::Credential;

/// Directory inside the install root that receives the credential.
pub const AUTH_DIR: &str = "auth";

/// Copy the configured private key into the install tree.
///
/// Copy failures are downgraded to warnings; the install carries on.
#[derive(Debug)]
pub struct ProvisionCredential;

impl Task for ProvisionCredential {
    fn name(&self) -> &'static str {
        "Provision credential"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(source) = &ctx.credential else {
            return Ok(TaskResult::Skipped("no credential configured".to_string()));
        };
        let credential = Credential::new(source.clone(), ctx.paths.install_dir().join(AUTH_DIR));
        process_resources(
            ctx,
            std::iter::once(credential),
            &ProcessOpts::apply_all("copy").no_bail(),
        )
    }
}
