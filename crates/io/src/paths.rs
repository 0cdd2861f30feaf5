// Config directory resolution

use std::path::PathBuf;

use emustation_config::Settings;

/// Resolve the directory holding the settings file.
///
/// A ConfigDirectory set from the command line wins; otherwise the platform
/// config directory is used. The directory is not created here.
pub fn config_dir(settings: &Settings) -> PathBuf {
    let configured = settings.get_string("ConfigDirectory");
    if !configured.is_empty() {
        return PathBuf::from(configured);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emustation")
}
