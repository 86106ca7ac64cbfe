use anyhow::Result;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "snellen-wizard";

/// Resolve deployment folder (absolute path)
pub fn resolve_deployment_folder() -> PathBuf {
    // Prefer the folder where the binary is running from
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return dir.to_path_buf();
        }
    }

    // Fallback: current working directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve log folder (absolute path) and make sure it exists.
///
/// Order: explicit folder from settings, then the per-user data folder, then `logs/` next to
/// the binary.
pub fn resolve_log_folder(configured: Option<&Path>) -> Result<PathBuf> {
    let dir = match configured {
        Some(p) => p.to_path_buf(),
        None => dirs::data_local_dir()
            .map(|d| d.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| resolve_deployment_folder().join("logs")),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_log_folder_is_created() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let wanted = tmp.path().join("nested").join("logs");
        let got = resolve_log_folder(Some(&wanted)).expect("resolve");
        assert_eq!(got, wanted);
        assert!(got.is_dir());
    }
}
