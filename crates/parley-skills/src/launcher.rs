//! Handing URLs and files to the desktop.

use crate::error::SkillError;

/// Opens URLs and local files somewhere the user can see them.
pub trait Launcher: Send + Sync {
    fn launch(&self, target: &str) -> Result<(), SkillError>;
}

/// The desktop's default handler: a browser for URLs, the associated
/// application for files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopLauncher;

impl Launcher for DesktopLauncher {
    fn launch(&self, target: &str) -> Result<(), SkillError> {
        open::that_detached(target).map_err(|e| SkillError::Launch {
            target: target.to_string(),
            reason: e.to_string(),
        })
    }
}
