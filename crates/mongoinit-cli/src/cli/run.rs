use mongoinit_core::{provision, AdminBackend, ProvisionOutcome, ProvisionRequest};

use crate::settings::Settings;

pub async fn run<B: AdminBackend>(settings: &Settings, backend: &B) -> anyhow::Result<()> {
    let request = ProvisionRequest {
        root: settings.root.clone(),
        user: settings.user.clone(),
        skip_existing: settings.skip_existing,
    };
    let outcome = provision(backend, &request).await.map_err(|err| {
        tracing::error!(event = "provision_failed", reason = err.kind(), error = %err);
        err
    })?;
    println!("{}", render_outcome(&outcome)?);
    Ok(())
}

pub(crate) fn render_outcome(outcome: &ProvisionOutcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
