// Clipboard writers: an external copy command when one is installed,
// otherwise an OSC 52 escape sequence understood by most modern terminals.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::platform::{run_with_stdin, PlatformError};

/// Write-only access to the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError>;
}

/// Pipes text into a copy command such as `pbcopy` or `wl-copy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    argv: Vec<String>,
}

impl CommandClipboard {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// Find the first copy tool available on this machine.
    pub fn detect() -> Option<Self> {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        let candidates: [(&str, &[&str], bool); 5] = [
            ("pbcopy", &[], true),
            ("wl-copy", &[], wayland),
            ("xclip", &["-selection", "clipboard"], true),
            ("xsel", &["--clipboard", "--input"], true),
            ("clip.exe", &[], true),
        ];
        candidates
            .iter()
            .filter(|(_, _, enabled)| *enabled)
            .find(|(program, _, _)| which::which(program).is_ok())
            .map(|(program, args, _)| {
                let mut argv = vec![program.to_string()];
                argv.extend(args.iter().map(|a| a.to_string()));
                Self::new(argv)
            })
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        run_with_stdin(&self.argv, text.as_bytes(), &[]).await
    }
}

/// Sets the clipboard through the terminal with an OSC 52 sequence.
#[derive(Debug, Clone, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", BASE64.encode(text))
    }
}

#[async_trait]
impl Clipboard for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        // The TUI draws on stderr, so the sequence goes to the same terminal.
        let mut stderr = std::io::stderr();
        stderr.write_all(Self::sequence(text).as_bytes())?;
        stderr.flush()?;
        Ok(())
    }
}

/// Pick a clipboard: the configured command, a detected tool, or OSC 52.
pub fn system_clipboard(command: &[String]) -> Arc<dyn Clipboard> {
    if !command.is_empty() {
        return Arc::new(CommandClipboard::new(command.to_vec()));
    }
    match CommandClipboard::detect() {
        Some(clipboard) => {
            tracing::debug!(argv = ?clipboard.argv(), "using clipboard command");
            Arc::new(clipboard)
        }
        None => {
            tracing::debug!("no clipboard command found, falling back to OSC 52");
            Arc::new(Osc52Clipboard)
        }
    }
}
