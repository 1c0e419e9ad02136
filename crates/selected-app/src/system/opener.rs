//! URL opening through the OS.
//!
//! The default handler goes through the `opener` crate. Opening with a
//! specific application and resolving bundle ids use the macOS `open` and
//! `mdfind` tools; elsewhere those fall back to the default handler.

#[cfg(target_os = "macos")]
use std::process::Command;
use url::Url;

use selected_core::CapabilityError;
use selected_plugin_api::{AppLocation, UrlOpener};

/// Opens URLs with the system handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &Url) -> Result<(), CapabilityError> {
        tracing::debug!("Opening {}", url);
        opener::open(url.as_str()).map_err(|e| CapabilityError::Failed(e.to_string()))
    }

    #[cfg(target_os = "macos")]
    fn open_with(&self, url: &Url, app: &AppLocation, activate: bool) -> Result<(), CapabilityError> {
        tracing::debug!("Opening {} with {:?}", url, app.path());
        let mut cmd = Command::new("open");
        cmd.arg("-a").arg(app.path());
        if !activate {
            cmd.arg("-g");
        }
        let status = cmd.arg(url.as_str()).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(CapabilityError::Failed(format!("open exited with {}", status)))
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn open_with(&self, url: &Url, _app: &AppLocation, _activate: bool) -> Result<(), CapabilityError> {
        self.open(url)
    }

    #[cfg(target_os = "macos")]
    fn resolve_application(&self, app_id: &str) -> Option<AppLocation> {
        let query = format!("kMDItemCFBundleIdentifier == '{}'", app_id.replace('\'', ""));
        let output = Command::new("mdfind").arg(query).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.lines().find(|line| !line.trim().is_empty())?;
        Some(AppLocation(path.trim().into()))
    }

    #[cfg(not(target_os = "macos"))]
    fn resolve_application(&self, _app_id: &str) -> Option<AppLocation> {
        None
    }
}
