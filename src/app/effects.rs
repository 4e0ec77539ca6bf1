// Effect execution: spawns the async work the composer asks for and reports
// each outcome back as an action.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::action::Action;
use crate::api::models::GeneratePoemInput;
use crate::app::App;
use crate::composer::{Effect, Notice, ShareOrigin};
use crate::photo;
use crate::platform::share::SharePayload;

impl App {
    pub(super) fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(notice) => self.show_notice(notice),
                Effect::ReadPhoto { request, path } => self.spawn_read_photo(request, path),
                Effect::Generate { token, input } => self.spawn_generate(token, input),
                Effect::AbortGeneration { token } => self.abort_generation(token),
                Effect::CopyToClipboard { session, text } => self.spawn_copy(session, text),
                Effect::Share { payload, origin } => self.spawn_share(payload, origin),
            }
        }
    }

    /// Show a notice and schedule its removal. A later notice is never
    /// cleared by an earlier one's timer.
    pub(super) fn show_notice(&mut self, notice: Notice) {
        self.notice_id += 1;
        self.notice = Some(notice);

        let id = self.notice_id;
        let tx = self.action_tx.clone();
        let ttl = Duration::from_secs(self.config.general.notice_secs);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            tx.send(Action::ClearNotice(id)).ok();
        });
    }

    fn spawn_read_photo(&self, request: u64, path: PathBuf) {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = photo::read_photo(&path).await.map_err(|e| e.to_string());
            tx.send(Action::PhotoRead { request, result }).ok();
        });
    }

    fn spawn_generate(&mut self, token: u64, input: GeneratePoemInput) {
        let tx = self.action_tx.clone();
        let generator = Arc::clone(&self.services.generator);
        let timeout = Duration::from_secs(self.config.generator.timeout_secs.max(1));

        tracing::info!(token, "generating poem");
        let handle = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, generator.generate(input)).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(e.to_string()),
                Err(_) => Err(format!(
                    "Poem generation timed out after {} seconds",
                    timeout.as_secs()
                )),
            };
            tx.send(Action::PoemGenerated { token, result }).ok();
        });
        self.generation_task = Some((token, handle.abort_handle()));
    }

    fn abort_generation(&mut self, token: u64) {
        if let Some((running, handle)) = self.generation_task.take() {
            if running == token {
                tracing::debug!(token, "aborting generation");
                handle.abort();
            } else {
                self.generation_task = Some((running, handle));
            }
        }
    }

    pub(super) fn abort_running_generation(&mut self) {
        if let Some((_, handle)) = self.generation_task.take() {
            handle.abort();
        }
    }

    fn spawn_copy(&self, session: u64, text: String) {
        let tx = self.action_tx.clone();
        let clipboard = Arc::clone(&self.services.clipboard);
        tokio::spawn(async move {
            let result = clipboard.write_text(&text).await.map_err(|e| e.to_string());
            tx.send(Action::ClipboardWritten { session, result }).ok();
        });
    }

    fn spawn_share(&self, payload: SharePayload, origin: ShareOrigin) {
        let tx = self.action_tx.clone();
        let share = Arc::clone(&self.services.share);
        tokio::spawn(async move {
            let result = share.share(&payload).await.map_err(|e| e.to_string());
            tx.send(Action::ShareFinished { origin, result }).ok();
        });
    }
}
