// "Share to apps": hands the poem to an external share command, such as
// Termux's share sheet or a user-configured script.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{ShareConfig, ShareFormat};
use crate::platform::{run_with_stdin, PlatformError};

pub const SHARE_TITLE_ENV: &str = "PHOTOPOET_SHARE_TITLE";

/// What gets shared: the poem, titled, with the photo it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<(), PlatformError>;
}

/// Runs a share command with the payload on stdin.
#[derive(Debug, Clone)]
pub struct CommandShare {
    argv: Vec<String>,
    format: ShareFormat,
}

impl CommandShare {
    pub fn new(argv: Vec<String>, format: ShareFormat) -> Self {
        Self { argv, format }
    }

    /// Termux exposes the Android share sheet as `termux-share`.
    pub fn detect() -> Option<Self> {
        which::which("termux-share").ok().map(|_| {
            Self::new(
                vec!["termux-share".into(), "-a".into(), "send".into()],
                ShareFormat::Text,
            )
        })
    }

    pub fn stdin_for(&self, payload: &SharePayload) -> Result<Vec<u8>, PlatformError> {
        match self.format {
            ShareFormat::Text => Ok(payload.text.clone().into_bytes()),
            ShareFormat::Json => serde_json::to_vec(payload)
                .map_err(|e| PlatformError::Io(std::io::Error::other(e))),
        }
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    async fn share(&self, payload: &SharePayload) -> Result<(), PlatformError> {
        let input = self.stdin_for(payload)?;
        run_with_stdin(&self.argv, &input, &[(SHARE_TITLE_ENV, &payload.title)]).await
    }
}

/// Stand-in used when no share command exists on this system.
#[derive(Debug, Clone, Default)]
pub struct UnavailableShare;

#[async_trait]
impl ShareTarget for UnavailableShare {
    async fn share(&self, _payload: &SharePayload) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable(
            "Sharing is not available on this system".to_string(),
        ))
    }
}

/// Pick a share target from config, falling back to detection.
pub fn system_share(config: &ShareConfig) -> Arc<dyn ShareTarget> {
    if !config.command.is_empty() {
        return Arc::new(CommandShare::new(config.command.clone(), config.format));
    }
    match CommandShare::detect() {
        Some(share) => Arc::new(share),
        None => {
            tracing::debug!("no share command configured or detected");
            Arc::new(UnavailableShare)
        }
    }
}
