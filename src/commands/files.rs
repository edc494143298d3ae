// ABOUTME: Files command implementation.
// ABOUTME: Prints the deployment manifest without contacting the remote host.

use super::session::load_target;
use std::path::Path;
use uvdeploy::error::Result;
use uvdeploy::files::{GitFiles, select_files};
use uvdeploy::output::Output;

pub async fn files(project_dir: &Path, output: &Output) -> Result<()> {
    let (_, target) = load_target(project_dir)?;

    let manifest = select_files(&GitFiles, project_dir, &target.exclusions).await?;
    for path in &manifest {
        output.item(path);
    }

    output.progress(&format!(
        "{} file(s) selected, plus {}",
        manifest.len(),
        target.lock_file
    ));
    Ok(())
}
