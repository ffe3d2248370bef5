//! Interactive console menu.
//!
//! Generic over input and output so the whole dialogue can be driven from
//! tests. Errors from a single action are reported and the menu keeps running.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::error;
use webtoapp_core::{AppKind, CreateAppRequest, DeleteOutcome, WebAppManager, WebToAppError};

const BANNER: &str = "///////WebToApp////////";
const RULE: &str = "----------------------------------------";

/// What the main loop should do after an action.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Console front end over a [`WebAppManager`].
pub struct Menu<R, W> {
    manager: WebAppManager,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(manager: WebAppManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{}", BANNER)?;
            writeln!(self.output, "1. Create new web app")?;
            writeln!(self.output, "2. List existing apps")?;
            writeln!(self.output, "3. Delete an app")?;
            writeln!(self.output, "4. Exit")?;

            let Some(choice) = self.prompt("\nSelect an option (1-4): ")? else {
                writeln!(self.output, "\nGoodbye!")?;
                return Ok(());
            };

            let outcome = match choice.as_str() {
                "1" => self.create_app(),
                "2" => self.list_apps().map(|_| Flow::Continue),
                "3" => self.delete_app(),
                "4" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option, please try again.")?;
                    Ok(Flow::Continue)
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    writeln!(self.output, "\nGoodbye!")?;
                    return Ok(());
                }
                Err(e) => {
                    error!("Menu error: {:#}", e);
                    writeln!(self.output, "Error: {:#}", e)?;
                }
            }
        }
    }

    /// Print `message` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn create_app(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n{}", BANNER)?;
        writeln!(self.output, "Hello! Let's create a new app for ya!")?;

        let Some(name) = self.prompt("Please give a name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(url) = self.prompt("Please give the URL: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(icon) = self.prompt("Please write the icon path for the app: ")? else {
            return Ok(Flow::Exit);
        };

        if name.is_empty() || url.is_empty() {
            writeln!(self.output, "Error: Name and URL are required!")?;
            return Ok(Flow::Continue);
        }

        let kind = loop {
            let Some(answer) = self.prompt(
                "\nYou want this shortcut to be a OIB(Open in browser) or a Webview? (oib/webview): ",
            )?
            else {
                return Ok(Flow::Exit);
            };
            match answer.parse::<AppKind>() {
                Ok(kind) => break kind,
                Err(_) => writeln!(self.output, "Please enter either 'oib' or 'webview'")?,
            }
        };

        writeln!(self.output, "Creating your app..")?;
        let request = CreateAppRequest {
            name,
            url,
            icon,
            kind,
        };

        match self.manager.create_app(request) {
            Ok(created) => {
                for warning in &created.warnings {
                    writeln!(self.output, "Warning: {}", warning)?;
                }
                if created.replaced {
                    writeln!(
                        self.output,
                        "Replaced the existing app named {}.",
                        created.record.name
                    )?;
                }
                writeln!(self.output, "it's done!")?;
                writeln!(self.output, "-----------+----------------")?;
            }
            Err(e @ WebToAppError::Validation { .. }) => {
                writeln!(self.output, "Error: {}", e)?;
            }
            Err(e) => {
                error!("Error creating app: {}", e);
                writeln!(self.output, "Failed to create the app: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn list_apps(&mut self) -> Result<()> {
        let apps = self.manager.list_apps()?;
        if apps.is_empty() {
            writeln!(self.output, "\nNo apps created yet!")?;
            return Ok(());
        }

        writeln!(self.output, "\nExisting Web Apps:")?;
        writeln!(self.output, "{}", RULE)?;
        for app in &apps {
            writeln!(self.output, "Name: {}", app.name)?;
            writeln!(self.output, "URL: {}", app.url)?;
            writeln!(self.output, "Type: {}", app.kind)?;
            writeln!(self.output, "Icon: {}", app.icon)?;
            writeln!(self.output, "{}", RULE)?;
        }
        Ok(())
    }

    fn delete_app(&mut self) -> Result<Flow> {
        let apps = self.manager.list_apps()?;
        if apps.is_empty() {
            writeln!(self.output, "\nNo apps to delete!")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nSelect an app to delete:")?;
        for (i, app) in apps.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, app.name)?;
        }

        let Some(answer) = self.prompt("\nEnter the number of the app to delete (0 to cancel): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Ok(number) = answer.parse::<i64>() else {
            writeln!(self.output, "Invalid input! Please enter a number.")?;
            return Ok(Flow::Continue);
        };
        let Ok(index) = usize::try_from(number) else {
            writeln!(self.output, "Invalid selection!")?;
            return Ok(Flow::Continue);
        };

        match self.manager.delete_app(index) {
            Ok(DeleteOutcome::Deleted(record)) => {
                writeln!(self.output, "\nSuccessfully deleted {}!", record.name)?;
            }
            Ok(DeleteOutcome::Cancelled) => {}
            Ok(DeleteOutcome::InvalidSelection { .. }) => {
                writeln!(self.output, "Invalid selection!")?;
            }
            Ok(DeleteOutcome::NoApps) => {
                writeln!(self.output, "\nNo apps to delete!")?;
            }
            Err(e) => {
                error!("Error deleting app: {}", e);
                writeln!(self.output, "Failed to delete the app: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;
    use webtoapp_core::AppContext;

    fn manager(temp_dir: &TempDir) -> WebAppManager {
        let ctx = AppContext::with_home(temp_dir.path())
            .with_window_bin("/usr/local/bin/webtoapp-window")
            .with_refresh_command(None);
        ctx.ensure_directories().unwrap();
        WebAppManager::new(ctx)
    }

    /// Run a scripted session and return everything printed.
    fn session(temp_dir: &TempDir, script: &str) -> String {
        let mut menu = Menu::new(manager(temp_dir), Cursor::new(script.as_bytes()), Vec::new());
        menu.run().unwrap();
        String::from_utf8(menu.output().clone()).unwrap()
    }

    #[test]
    fn test_exit() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "4\n");
        assert!(out.contains("1. Create new web app"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "");
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_option() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "9\n4\n");
        assert!(out.contains("Invalid option, please try again."));
    }

    #[test]
    fn test_create_reprompts_type_then_lists() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(
            &temp_dir,
            "1\nMy Tool\nexample.com\n\nbrowser\nOIB\n2\n4\n",
        );

        assert!(out.contains("Please enter either 'oib' or 'webview'"));
        assert!(out.contains("it's done!"));
        assert!(out.contains("Name: My Tool"));
        assert!(out.contains("URL: https://example.com"));
        assert!(out.contains("Type: oib"));

        let apps = manager(&temp_dir).list_apps().unwrap();
        assert_eq!(apps.len(), 1);
    }

    #[test]
    fn test_create_requires_name_and_url() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "1\n\nexample.com\n\n4\n");

        assert!(out.contains("Error: Name and URL are required!"));
        assert!(manager(&temp_dir).list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_list_empty() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "2\n4\n");
        assert!(out.contains("No apps created yet!"));
    }

    #[test]
    fn test_delete_flow() {
        let temp_dir = TempDir::new().unwrap();
        session(&temp_dir, "1\nMail\nmail.example\n\noib\n4\n");

        let out = session(&temp_dir, "3\nabc\n3\n5\n3\n0\n3\n1\n4\n");

        assert!(out.contains("1. Mail"));
        assert!(out.contains("Invalid input! Please enter a number."));
        assert!(out.contains("Invalid selection!"));
        assert!(out.contains("Successfully deleted Mail!"));
        assert!(manager(&temp_dir).list_apps().unwrap().is_empty());
    }

    #[test]
    fn test_delete_negative_number_is_invalid_selection() {
        let temp_dir = TempDir::new().unwrap();
        session(&temp_dir, "1\nMail\nmail.example\n\noib\n4\n");

        let out = session(&temp_dir, "3\n-1\n4\n");

        assert!(out.contains("Invalid selection!"));
        assert!(!out.contains("Invalid input!"));
        assert_eq!(manager(&temp_dir).list_apps().unwrap().len(), 1);
    }

    #[test]
    fn test_case_variant_name_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(
            &temp_dir,
            "1\nMy Tool\nexample.com\n\noib\n1\nmy tool\nexample.com\n\noib\n4\n",
        );

        assert!(out.contains("would share files with the existing app 'My Tool'"));
        assert_eq!(manager(&temp_dir).list_apps().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_with_no_apps() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "3\n4\n");
        assert!(out.contains("No apps to delete!"));
    }

    #[test]
    fn test_bad_url_is_reported_and_menu_continues() {
        let temp_dir = TempDir::new().unwrap();
        let out = session(&temp_dir, "1\nBroken\nnot a url\n\nwebview\n4\n");

        assert!(out.contains("Error: Validation error for url"));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
