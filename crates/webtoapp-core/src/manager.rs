//! High-level app management: create, list and delete generated apps.
//!
//! Creation generates artifacts first and records them last; deletion removes
//! artifacts first and rewrites the registry last. A crash between the two
//! steps can leave a registry entry whose files are gone, which a later delete
//! cleans up because missing files are not errors.

use crate::config::PathsConfig;
use crate::context::AppContext;
use crate::error::{Result, WebToAppError};
use crate::naming::{launcher_slug, parse_app_url, shortcut_slug};
use crate::platform;
use crate::registry::{AppKind, AppRecord, AppRegistry};
use crate::shortcut::{DesktopEntry, LaunchScriptGenerator};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// User input for a new app.
#[derive(Debug, Clone, Default)]
pub struct CreateAppRequest {
    pub name: String,
    pub url: String,
    /// Icon path as typed; empty for none.
    pub icon: String,
    pub kind: AppKind,
}

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedApp {
    pub record: AppRecord,
    /// Whether an existing app with the same name was overwritten.
    pub replaced: bool,
    /// Non-fatal problems, e.g. a missing icon file.
    pub warnings: Vec<String>,
}

/// Outcome of deleting by menu index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The registry is empty.
    NoApps,
    /// Index 0 was chosen.
    Cancelled,
    /// The index is past the end of the list.
    InvalidSelection { index: usize, count: usize },
    Deleted(AppRecord),
}

/// Creates, lists and deletes apps for one [`AppContext`].
pub struct WebAppManager {
    context: AppContext,
    registry: AppRegistry,
    scripts: LaunchScriptGenerator,
}

impl WebAppManager {
    pub fn new(context: AppContext) -> Self {
        let registry = AppRegistry::new(&context.registry_path, context.registry_lock_path());
        let scripts = LaunchScriptGenerator::new(&context.launchers_dir, &context.window_bin);
        Self {
            context,
            registry,
            scripts,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Generate the launcher and shortcut for a new app and record it.
    ///
    /// An existing app with the same name is overwritten.
    pub fn create_app(&self, request: CreateAppRequest) -> Result<CreatedApp> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(WebToAppError::validation("name", "Name is required"));
        }
        let url = parse_app_url(&request.url)?;
        self.check_artifact_collision(&name)?;

        let mut warnings = Vec::new();
        let icon = resolve_icon(request.icon.trim())?;
        if !icon.is_empty() && !Path::new(&icon).exists() {
            warn!("Icon file not found: {}", icon);
            warnings.push(format!(
                "Icon file not found: {}. The app will use the default icon.",
                icon
            ));
        }

        let storage_dir = self.storage_dir_for(&name);
        fs::create_dir_all(&storage_dir)
            .map_err(|e| WebToAppError::io_with_path(e, &storage_dir))?;

        let launcher_path = match request.kind {
            AppKind::Webview => self.scripts.generate_webview(&name, &url, &storage_dir)?,
            AppKind::Oib => self.scripts.generate_browser(&name, &url)?,
        };
        let shortcut_path = self.generate_shortcut(&name, &launcher_path, &icon)?;

        let record = AppRecord {
            name: name.clone(),
            url,
            icon,
            kind: request.kind,
            launcher_path,
            shortcut_path,
            storage_dir,
        };
        let replaced = self.registry.create(record.clone())?.is_some();

        info!("Created {} app {}", record.kind, name);
        Ok(CreatedApp {
            record,
            replaced,
            warnings,
        })
    }

    /// Write the `.desktop` entry for a launcher and refresh the application index.
    pub fn generate_shortcut(
        &self,
        app_name: &str,
        launcher_path: &Path,
        icon: &str,
    ) -> Result<PathBuf> {
        let exec = [
            self.context.interpreter.to_string_lossy().into_owned(),
            absolute(launcher_path)?.to_string_lossy().into_owned(),
        ];
        let entry = DesktopEntry::new(app_name, exec)
            .with_comment(format!("Web application for {}", app_name))
            .with_icon(icon);

        let path = self.shortcut_path_for(app_name);
        entry.write_to_file(&path)?;
        self.refresh_app_index();
        Ok(path)
    }

    /// All apps in registry order.
    pub fn list_apps(&self) -> Result<Vec<AppRecord>> {
        self.registry.list()
    }

    /// Delete the app at a 1-based position of [`WebAppManager::list_apps`].
    pub fn delete_app(&self, index: usize) -> Result<DeleteOutcome> {
        let apps = self.list_apps()?;
        if apps.is_empty() {
            return Ok(DeleteOutcome::NoApps);
        }
        if index == 0 {
            return Ok(DeleteOutcome::Cancelled);
        }
        let Some(record) = apps.get(index - 1) else {
            return Ok(DeleteOutcome::InvalidSelection {
                index,
                count: apps.len(),
            });
        };

        self.delete_record(record)?;
        Ok(DeleteOutcome::Deleted(record.clone()))
    }

    /// Delete an app by its exact name.
    pub fn delete_app_by_name(&self, name: &str) -> Result<AppRecord> {
        let record = self
            .registry
            .get(name)?
            .ok_or_else(|| WebToAppError::AppNotFound {
                name: name.to_string(),
            })?;
        self.delete_record(&record)?;
        Ok(record)
    }

    /// Reject a name whose generated files belong to a differently named app,
    /// e.g. "My Tool" after "my tool".
    fn check_artifact_collision(&self, name: &str) -> Result<()> {
        let launcher = self.scripts.script_path(name);
        let shortcut = self.shortcut_path_for(name);
        let storage = self.storage_dir_for(name);

        let clash = self.registry.list()?.into_iter().find(|existing| {
            existing.name != name
                && (existing.launcher_path == launcher
                    || existing.shortcut_path == shortcut
                    || existing.storage_dir == storage)
        });
        match clash {
            Some(existing) => Err(WebToAppError::validation(
                "name",
                format!(
                    "'{}' would share files with the existing app '{}'",
                    name, existing.name
                ),
            )),
            None => Ok(()),
        }
    }

    fn delete_record(&self, record: &AppRecord) -> Result<()> {
        remove_file_if_exists(&record.launcher_path)?;
        remove_file_if_exists(&record.shortcut_path)?;
        if !is_direct_child(&self.context.storage_root, &record.storage_dir) {
            warn!(
                "Not removing storage {} outside {}",
                record.storage_dir.display(),
                self.context.storage_root.display()
            );
        } else if record.storage_dir.exists() {
            fs::remove_dir_all(&record.storage_dir)
                .map_err(|e| WebToAppError::io_with_path(e, &record.storage_dir))?;
            debug!("Removed storage {}", record.storage_dir.display());
        }

        self.registry.remove(&record.name)?;
        self.refresh_app_index();

        info!("Deleted app {}", record.name);
        Ok(())
    }

    /// Storage directory for an app: `<storage_root>/<underscore slug>`.
    pub fn storage_dir_for(&self, app_name: &str) -> PathBuf {
        self.context.storage_root.join(launcher_slug(app_name))
    }

    /// Shortcut path for an app: `<apps_dir>/<hyphen slug>.desktop`.
    pub fn shortcut_path_for(&self, app_name: &str) -> PathBuf {
        self.context.apps_dir.join(format!(
            "{}.{}",
            shortcut_slug(app_name),
            PathsConfig::SHORTCUT_EXTENSION
        ))
    }

    fn refresh_app_index(&self) {
        if let Some(ref command) = self.context.refresh_command {
            platform::refresh_app_index(command, &self.context.apps_dir);
        }
    }
}

fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(WebToAppError::io_with_path(e, path)),
    }
}

/// `path` is `<root>/<single normal component>`.
fn is_direct_child(root: &Path, path: &Path) -> bool {
    let mut components = path.components();
    matches!(components.next_back(), Some(Component::Normal(_))) && components.as_path() == root
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path))
}

/// Absolute form of a user-typed icon path; empty stays empty.
fn resolve_icon(icon: &str) -> Result<String> {
    if icon.is_empty() {
        return Ok(String::new());
    }
    let path = absolute(Path::new(icon))?;
    let resolved = fs::canonicalize(&path).unwrap_or(path);
    Ok(resolved.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir) -> WebAppManager {
        let ctx = AppContext::with_home(temp_dir.path())
            .with_window_bin("/opt/webtoapp/webtoapp-window")
            .with_refresh_command(None);
        ctx.ensure_directories().unwrap();
        WebAppManager::new(ctx)
    }

    fn request(name: &str, url: &str, kind: AppKind) -> CreateAppRequest {
        CreateAppRequest {
            name: name.to_string(),
            url: url.to_string(),
            icon: String::new(),
            kind,
        }
    }

    #[test]
    fn test_create_requires_name_and_url() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let err = manager.create_app(request("  ", "example.com", AppKind::Oib)).unwrap_err();
        assert!(err.is_validation());
        let err = manager.create_app(request("Mail", "", AppKind::Oib)).unwrap_err();
        assert!(err.is_validation());
        assert!(manager.list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_create_webview_app() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let created = manager
            .create_app(request("Team Chat", "chat.example", AppKind::Webview))
            .unwrap();
        let record = created.record;

        assert_eq!(record.url, "https://chat.example");
        assert_eq!(record.kind, AppKind::Webview);
        assert!(record.launcher_path.ends_with("team_chat_launcher.sh"));
        assert!(record.shortcut_path.ends_with("team-chat.desktop"));
        assert!(record.storage_dir.ends_with("storage/team_chat"));
        assert!(record.storage_dir.is_dir());

        let script = fs::read_to_string(&record.launcher_path).unwrap();
        assert!(script.contains("webtoapp-window"));
    }

    #[test]
    fn test_missing_icon_warns_but_creates() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let icon = temp_dir.path().join("missing.png");
        let mut req = request("Mail", "mail.example", AppKind::Oib);
        req.icon = icon.to_string_lossy().into_owned();

        let created = manager.create_app(req).unwrap();
        assert_eq!(created.warnings.len(), 1);
        assert_eq!(created.record.icon, icon.to_string_lossy());

        let shortcut = fs::read_to_string(&created.record.shortcut_path).unwrap();
        assert!(shortcut.contains(&format!("Icon={}\n", icon.display())));
    }

    #[test]
    fn test_existing_icon_no_warning() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let icon = temp_dir.path().join("icon.png");
        fs::write(&icon, b"png").unwrap();
        let mut req = request("Mail", "mail.example", AppKind::Oib);
        req.icon = icon.to_string_lossy().into_owned();

        let created = manager.create_app(req).unwrap();
        assert!(created.warnings.is_empty());
        assert!(Path::new(&created.record.icon).is_absolute());
    }

    #[test]
    fn test_delete_cancel_and_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        assert_eq!(manager.delete_app(1).unwrap(), DeleteOutcome::NoApps);

        let record = manager
            .create_app(request("Mail", "mail.example", AppKind::Oib))
            .unwrap()
            .record;

        assert_eq!(manager.delete_app(0).unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(
            manager.delete_app(2).unwrap(),
            DeleteOutcome::InvalidSelection { index: 2, count: 1 }
        );

        assert_eq!(manager.list_apps().unwrap(), vec![record.clone()]);
        assert!(record.launcher_path.exists());
        assert!(record.shortcut_path.exists());
        assert!(record.storage_dir.exists());
    }

    #[test]
    fn test_delete_removes_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let record = manager
            .create_app(request("Team Chat", "chat.example", AppKind::Webview))
            .unwrap()
            .record;
        fs::write(record.storage_dir.join("app_data.db"), b"").unwrap();

        let outcome = manager.delete_app(1).unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted(record.clone()));
        assert!(!record.launcher_path.exists());
        assert!(!record.shortcut_path.exists());
        assert!(!record.storage_dir.exists());
        assert!(manager.list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_delete_with_artifacts_already_gone() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let record = manager
            .create_app(request("Mail", "mail.example", AppKind::Oib))
            .unwrap()
            .record;
        fs::remove_file(&record.launcher_path).unwrap();
        fs::remove_file(&record.shortcut_path).unwrap();
        fs::remove_dir_all(&record.storage_dir).unwrap();

        assert!(matches!(
            manager.delete_app(1).unwrap(),
            DeleteOutcome::Deleted(_)
        ));
        assert!(manager.list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_delete_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        manager
            .create_app(request("Mail", "mail.example", AppKind::Oib))
            .unwrap();

        assert_eq!(manager.delete_app_by_name("Mail").unwrap().name, "Mail");
        assert!(matches!(
            manager.delete_app_by_name("Mail"),
            Err(WebToAppError::AppNotFound { .. })
        ));
    }

    #[test]
    fn test_dot_names_stay_inside_storage_root() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let mail = manager
            .create_app(request("Mail", "mail.example", AppKind::Webview))
            .unwrap()
            .record;
        fs::write(mail.storage_dir.join("app_data.db"), b"").unwrap();

        for name in ["..", "."] {
            let record = manager
                .create_app(request(name, "dots.example", AppKind::Webview))
                .unwrap()
                .record;
            assert!(is_direct_child(&manager.context().storage_root, &record.storage_dir));
            assert_eq!(
                record.launcher_path.parent(),
                Some(manager.context().launchers_dir.as_path())
            );
            assert_eq!(
                record.shortcut_path.parent(),
                Some(manager.context().apps_dir.as_path())
            );

            manager.delete_app_by_name(name).unwrap();
        }

        assert!(manager.context().storage_root.is_dir());
        assert!(mail.storage_dir.join("app_data.db").exists());
        assert_eq!(manager.list_apps().unwrap(), vec![mail]);
    }

    #[test]
    fn test_delete_skips_storage_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let mut record = manager
            .create_app(request("Mail", "mail.example", AppKind::Oib))
            .unwrap()
            .record;
        // A hand-edited registry entry pointing at the storage root's parent.
        record.storage_dir = manager.context().storage_root.join("..");
        manager.registry().create(record).unwrap();

        manager.delete_app_by_name("Mail").unwrap();

        assert!(manager.context().storage_root.is_dir());
        assert!(manager.list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_case_variant_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let original = manager
            .create_app(request("My Tool", "example.com", AppKind::Oib))
            .unwrap()
            .record;

        let err = manager
            .create_app(request("my tool", "other.example", AppKind::Oib))
            .unwrap_err();
        assert!(err.is_validation());
        let err = manager
            .create_app(request("My_Tool", "other.example", AppKind::Oib))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(manager.list_apps().unwrap(), vec![original.clone()]);
        let script = fs::read_to_string(&original.launcher_path).unwrap();
        assert!(script.contains("https://example.com"));
        assert!(original.shortcut_path.exists());
    }

    #[test]
    fn test_same_name_still_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        manager
            .create_app(request("My Tool", "example.com", AppKind::Oib))
            .unwrap();
        let created = manager
            .create_app(request("My Tool", "example.org", AppKind::Oib))
            .unwrap();

        assert!(created.replaced);
        assert_eq!(manager.list_apps().unwrap().len(), 1);
    }

    #[test]
    fn test_is_direct_child() {
        let root = Path::new("/home/u/.local/share/webtoapp/storage");
        assert!(is_direct_child(root, &root.join("mail")));
        assert!(!is_direct_child(root, &root.join("..")));
        assert!(!is_direct_child(root, root));
        assert!(!is_direct_child(root, &root.join("a").join("b")));
        assert!(!is_direct_child(root, Path::new("/tmp/mail")));
    }
}
