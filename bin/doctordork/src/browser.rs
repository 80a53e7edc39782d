use std::process::{Command, Stdio};

use doctordork_core::{Error, Result};
use tracing::debug;

/// Hands a URL to something that can show it.
pub trait UrlOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Launches the platform's default browser without waiting for it.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        let mut command = opener_command(url);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        command
            .spawn()
            .map_err(|e| Error::Browser(format!("could not launch browser: {}", e)))?;
        debug!(url, "Opened URL in browser");
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    // cmd treats & as a command separator
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(url.replace('&', "^&"));
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
