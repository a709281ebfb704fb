use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Creates the parent directory of `path` when it has one.
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
            tracing::info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}

pub async fn check_ffmpeg(program: &Path) -> bool {
    match tokio::process::Command::new(program)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
    {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}
