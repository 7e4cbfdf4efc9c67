// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and removing convcheck's git hooks.

use crate::error::{ConvError, HookError, Result};
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{HookTemplate, HOOK_MARKER};

/// Manager for the hooks directory of one repository.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a hook manager for the repository in the current directory.
    pub fn new() -> Result<Self> {
        let repo = git::open_repo()?;
        Self::at(repo.git_dir().join("hooks"))
    }

    /// Create a hook manager for an explicit hooks directory.
    pub fn at(hooks_dir: impl Into<PathBuf>) -> Result<Self> {
        let hooks_dir = hooks_dir.into();

        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                ConvError::Hook(HookError::InstallFailed {
                    hook: "all".to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir })
    }

    /// Install one hook by name.
    pub fn install_hook(&self, hook_name: &str, force: bool) -> Result<()> {
        self.install_template(parse_hook(hook_name)?, force)
    }

    /// Install every known hook.
    pub fn install_all(&self, force: bool) -> Result<()> {
        for template in HookTemplate::all() {
            self.install_template(*template, force)?;
        }
        Ok(())
    }

    fn install_template(&self, template: HookTemplate, force: bool) -> Result<()> {
        let name = template.filename();
        let hook_path = self.hooks_dir.join(name);
        let install_err = |message: String| {
            ConvError::Hook(HookError::InstallFailed {
                hook: name.to_string(),
                message,
            })
        };

        // A foreign hook is kept as <name>.backup when forced.
        if hook_path.exists() && !is_convcheck_hook(&hook_path) {
            if !force {
                return Err(ConvError::Hook(HookError::AlreadyExists {
                    hook: name.to_string(),
                }));
            }
            fs::rename(&hook_path, backup_path(&hook_path))
                .map_err(|e| install_err(format!("Failed to back up existing hook: {}", e)))?;
        }

        fs::write(&hook_path, template.generate())
            .map_err(|e| install_err(format!("Failed to write hook: {}", e)))?;
        make_executable(&hook_path)
            .map_err(|e| install_err(format!("Failed to set permissions: {}", e)))?;

        tracing::debug!("Installed {} hook at {:?}", name, hook_path);
        Ok(())
    }

    /// Remove one hook, restoring any backup.
    pub fn uninstall_hook(&self, hook_name: &str) -> Result<()> {
        let name = parse_hook(hook_name)?.filename();
        let hook_path = self.hooks_dir.join(name);

        if !hook_path.exists() {
            return Ok(());
        }

        if !is_convcheck_hook(&hook_path) {
            return Err(ConvError::Hook(HookError::RemoveFailed {
                hook: name.to_string(),
                message: "Hook was not installed by convcheck".to_string(),
            }));
        }

        fs::remove_file(&hook_path).map_err(|e| {
            ConvError::Hook(HookError::RemoveFailed {
                hook: name.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        let backup = backup_path(&hook_path);
        if backup.exists() {
            if let Err(e) = fs::rename(&backup, &hook_path) {
                tracing::warn!("Could not restore {:?}: {}", backup, e);
            }
        }

        Ok(())
    }

    /// Remove every convcheck hook.
    pub fn uninstall_all(&self) -> Result<()> {
        for template in HookTemplate::all() {
            self.uninstall_hook(template.filename())?;
        }
        Ok(())
    }

    /// Installed state of each known hook.
    pub fn status(&self) -> Vec<(String, bool)> {
        HookTemplate::all()
            .iter()
            .map(|template| {
                let path = self.hooks_dir.join(template.filename());
                (template.filename().to_string(), is_convcheck_hook(&path))
            })
            .collect()
    }
}

fn parse_hook(hook_name: &str) -> Result<HookTemplate> {
    hook_name.parse::<HookTemplate>().map_err(|_| {
        ConvError::Hook(HookError::Unknown {
            hook: hook_name.to_string(),
        })
    })
}

fn backup_path(hook_path: &Path) -> PathBuf {
    let mut name = hook_path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

fn is_convcheck_hook(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.contains(HOOK_MARKER))
        .unwrap_or(false)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, HookManager) {
        let dir = TempDir::new().unwrap();
        let manager = HookManager::at(dir.path().join("hooks")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_install_and_status() {
        let (dir, manager) = manager();
        manager.install_all(false).unwrap();

        let status = manager.status();
        assert_eq!(
            status,
            vec![
                ("commit-msg".to_string(), true),
                ("pre-push".to_string(), true)
            ]
        );

        let script = fs::read_to_string(dir.path().join("hooks/commit-msg")).unwrap();
        assert!(script.contains("convcheck check --file"));

        // Reinstalling over our own hook needs no force.
        manager.install_hook("commit-msg", false).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_install_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, manager) = manager();
        manager.install_hook("pre-push", false).unwrap();
        let mode = fs::metadata(dir.path().join("hooks/pre-push"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_foreign_hook_requires_force() {
        let (dir, manager) = manager();
        let hook = dir.path().join("hooks/commit-msg");
        fs::write(&hook, "#!/bin/sh\necho custom\n").unwrap();

        assert!(matches!(
            manager.install_hook("commit-msg", false),
            Err(ConvError::Hook(HookError::AlreadyExists { .. }))
        ));

        manager.install_hook("commit-msg", true).unwrap();
        assert!(dir.path().join("hooks/commit-msg.backup").exists());

        manager.uninstall_hook("commit-msg").unwrap();
        let restored = fs::read_to_string(&hook).unwrap();
        assert!(restored.contains("echo custom"));
        assert!(!dir.path().join("hooks/commit-msg.backup").exists());
    }

    #[test]
    fn test_uninstall_foreign_hook_refused() {
        let (dir, manager) = manager();
        fs::write(dir.path().join("hooks/pre-push"), "#!/bin/sh\n").unwrap();
        assert!(matches!(
            manager.uninstall_hook("pre-push"),
            Err(ConvError::Hook(HookError::RemoveFailed { .. }))
        ));
    }

    #[test]
    fn test_unknown_hook() {
        let (_dir, manager) = manager();
        assert!(matches!(
            manager.install_hook("post-merge", false),
            Err(ConvError::Hook(HookError::Unknown { .. }))
        ));
    }

    #[test]
    fn test_uninstall_missing_is_noop() {
        let (_dir, manager) = manager();
        manager.uninstall_all().unwrap();
        assert!(manager.status().iter().all(|(_, installed)| !installed));
    }
}
