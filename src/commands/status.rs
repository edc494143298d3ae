// ABOUTME: Status command implementation.
// ABOUTME: Reports the systemd active state of the app's user unit.

use super::session::{connect, disconnect, load_target};
use std::path::Path;
use uvdeploy::diagnostics::Diagnostics;
use uvdeploy::error::Result;
use uvdeploy::output::Output;
use uvdeploy::service::ServiceController;

pub async fn status(project_dir: &Path, output: &Output) -> Result<()> {
    let (config, target) = load_target(project_dir)?;
    let mut diag = Diagnostics::default();

    let session = connect(&config, output).await?;
    let controller = ServiceController::new(&session, &target);
    let result = controller.status().await;
    let unit = controller.unit().to_string();
    disconnect(session, &config.host, &mut diag).await;
    let state = result?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.success(&format!("{unit} on {}: {state}", target.host));
    Ok(())
}
