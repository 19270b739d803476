use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn load_config<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| anyhow::anyhow!("Invalid {}: {e}", path.display()))
}

pub fn load_state<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path).map_err(|_| {
        anyhow::anyhow!(
            "No tracked state at {}. Run create or import first.",
            path.display()
        )
    })?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("State file {} is corrupted: {e}", path.display()))
}

/// Writes state readable only by the owner; token state holds a secret.
pub fn save_state<T: Serialize>(path: &Path, state: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(state)?;
    fs::write(path, content + "\n")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

pub fn remove_state(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
