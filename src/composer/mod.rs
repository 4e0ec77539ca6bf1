// The poem composer view-model: owns the photo, the poem, the loading flag
// and the share dialog. Transitions never do I/O; they return the effects
// the App should carry out and get told about the results later.

mod notice;

pub use notice::{Notice, NoticeVariant};

use std::path::PathBuf;

use crate::api::models::{GeneratePoemInput, GeneratePoemOutput};
use crate::photo::PhotoReference;
use crate::platform::share::SharePayload;

pub const MSG_UPLOAD_FIRST: &str = "Please upload a photo first.";
pub const MSG_NOTHING_TO_SHARE: &str = "No poem to share!";
pub const MSG_STILL_GENERATING: &str = "Poem is still being generated.";
pub const MSG_GENERATION_CANCELLED: &str = "Generation cancelled";
pub const MSG_SHARED: &str = "Shared successfully!";
pub const MSG_SHARE_FAILED: &str = "Sharing failed!";
pub const MSG_COPIED: &str = "Copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Copy failed!";
pub const MSG_PHOTO_FAILED: &str = "Could not load photo";

const FALLBACK_GENERATE: &str = "Failed to generate poem.";
const FALLBACK_SHARE: &str = "Could not share the poem.";
const FALLBACK_COPY: &str = "Could not copy the poem.";
const FALLBACK_PHOTO: &str = "The file could not be read.";

/// Where the user is in the upload → generate → share flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    PhotoLoaded,
    Generating,
    PoemReady,
    ShareDialogOpen,
}

/// Which surface started a share. Dialog shares carry the number of the
/// dialog opening they came from, so a late result can't touch a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOrigin {
    Direct,
    Dialog(u64),
}

/// Work the App performs on behalf of the composer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notice),
    ReadPhoto { request: u64, path: PathBuf },
    Generate { token: u64, input: GeneratePoemInput },
    AbortGeneration { token: u64 },
    CopyToClipboard { session: u64, text: String },
    Share { payload: SharePayload, origin: ShareOrigin },
}

/// State of the open share dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareDialogState {
    /// A copy or share started from the dialog hasn't settled yet.
    pub pending: bool,
    /// Last failure, shown inside the dialog until the next attempt.
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PoemComposer {
    photo: Option<PhotoReference>,
    poem: String,
    /// Token of the generation currently in flight.
    generation: Option<u64>,
    last_token: u64,
    photo_request: u64,
    photo_pending: bool,
    share_dialog: Option<ShareDialogState>,
    /// Bumped every time the share dialog opens.
    dialog_session: u64,
    share_title: String,
}

impl PoemComposer {
    pub fn new(share_title: impl Into<String>) -> Self {
        Self {
            photo: None,
            poem: String::new(),
            generation: None,
            last_token: 0,
            photo_request: 0,
            photo_pending: false,
            share_dialog: None,
            dialog_session: 0,
            share_title: share_title.into(),
        }
    }

    // ── Read access ──

    pub fn photo(&self) -> Option<&PhotoReference> {
        self.photo.as_ref()
    }

    pub fn poem(&self) -> &str {
        &self.poem
    }

    pub fn is_loading(&self) -> bool {
        self.generation.is_some()
    }

    pub fn is_reading_photo(&self) -> bool {
        self.photo_pending
    }

    /// Token of the in-flight generation, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.generation
    }

    pub fn share_dialog(&self) -> Option<&ShareDialogState> {
        self.share_dialog.as_ref()
    }

    pub fn is_share_dialog_visible(&self) -> bool {
        self.share_dialog.is_some()
    }

    pub fn stage(&self) -> Stage {
        if self.share_dialog.is_some() {
            Stage::ShareDialogOpen
        } else if self.is_loading() {
            Stage::Generating
        } else if !self.poem.is_empty() {
            Stage::PoemReady
        } else if self.photo.is_some() {
            Stage::PhotoLoaded
        } else {
            Stage::Idle
        }
    }

    // ── Photo intake ──

    /// Start reading a photo. Any earlier read still in progress is superseded.
    pub fn request_photo(&mut self, path: PathBuf) -> Vec<Effect> {
        if path.as_os_str().is_empty() {
            return vec![Effect::Notify(Notice::new("Enter the path of a photo."))];
        }
        self.photo_request += 1;
        self.photo_pending = true;
        vec![Effect::ReadPhoto {
            request: self.photo_request,
            path,
        }]
    }

    pub fn photo_read(
        &mut self,
        request: u64,
        result: Result<PhotoReference, String>,
    ) -> Vec<Effect> {
        if request != self.photo_request {
            tracing::debug!(request, latest = self.photo_request, "discarding stale photo read");
            return vec![];
        }
        self.photo_pending = false;
        match result {
            Ok(photo) => {
                tracing::info!(?photo, "photo loaded");
                let title = match photo.file_name() {
                    Some(name) => format!("Loaded {}", name),
                    None => "Photo loaded".to_string(),
                };
                self.photo = Some(photo);
                vec![Effect::Notify(Notice::new(title))]
            }
            Err(msg) => {
                tracing::error!("Error reading photo: {}", msg);
                vec![Effect::Notify(Notice::destructive(
                    MSG_PHOTO_FAILED,
                    &msg,
                    FALLBACK_PHOTO,
                ))]
            }
        }
    }

    // ── Generation ──

    /// Ask for a poem about the current photo. A generation already in
    /// flight is superseded and aborted.
    pub fn generate(&mut self) -> Vec<Effect> {
        let Some(photo) = self.photo.as_ref().filter(|p| !p.is_empty()) else {
            return vec![Effect::Notify(Notice::new(MSG_UPLOAD_FIRST))];
        };
        let input = GeneratePoemInput {
            photo_url: photo.data_url().to_string(),
        };

        let mut effects = Vec::new();
        if let Some(old) = self.generation.take() {
            effects.push(Effect::AbortGeneration { token: old });
        }
        self.last_token += 1;
        self.generation = Some(self.last_token);
        effects.push(Effect::Generate {
            token: self.last_token,
            input,
        });
        effects
    }

    /// Apply the outcome of generation `token`. Outcomes of superseded or
    /// cancelled requests are ignored.
    pub fn generation_settled(
        &mut self,
        token: u64,
        result: Result<GeneratePoemOutput, String>,
    ) -> Vec<Effect> {
        if self.generation != Some(token) {
            tracing::debug!(token, current = ?self.generation, "discarding stale generation result");
            return vec![];
        }
        self.generation = None;
        match result {
            Ok(output) => {
                self.poem = output.poem;
                vec![]
            }
            Err(msg) => {
                tracing::error!("Error generating poem: {}", msg);
                vec![Effect::Notify(Notice::destructive(
                    "Error",
                    &msg,
                    FALLBACK_GENERATE,
                ))]
            }
        }
    }

    pub fn cancel_generation(&mut self) -> Vec<Effect> {
        match self.generation.take() {
            Some(token) => vec![
                Effect::AbortGeneration { token },
                Effect::Notify(Notice::new(MSG_GENERATION_CANCELLED)),
            ],
            None => vec![],
        }
    }

    // ── Sharing ──

    fn share_blocked(&self) -> Option<Effect> {
        if self.poem.is_empty() {
            Some(Effect::Notify(Notice::new(MSG_NOTHING_TO_SHARE)))
        } else if self.is_loading() {
            Some(Effect::Notify(Notice::new(MSG_STILL_GENERATING)))
        } else {
            None
        }
    }

    fn payload(&self) -> SharePayload {
        SharePayload {
            title: self.share_title.clone(),
            text: self.poem.clone(),
            url: self
                .photo
                .as_ref()
                .map(|p| p.data_url().to_string())
                .unwrap_or_default(),
        }
    }

    /// Share straight to other apps, without the dialog.
    pub fn share(&mut self) -> Vec<Effect> {
        if let Some(blocked) = self.share_blocked() {
            return vec![blocked];
        }
        vec![Effect::Share {
            payload: self.payload(),
            origin: ShareOrigin::Direct,
        }]
    }

    /// Open the "copy or share?" dialog.
    pub fn request_share(&mut self) -> Vec<Effect> {
        if let Some(blocked) = self.share_blocked() {
            return vec![blocked];
        }
        self.dialog_session += 1;
        self.share_dialog = Some(ShareDialogState::default());
        vec![]
    }

    pub fn dismiss_share_dialog(&mut self) -> Vec<Effect> {
        self.share_dialog = None;
        vec![]
    }

    /// Begin a dialog action, unless the dialog is closed or busy.
    fn begin_dialog_action(&mut self) -> Option<Vec<Effect>> {
        if let Some(blocked) = self.share_blocked() {
            return Some(vec![blocked]);
        }
        let dialog = self.share_dialog.as_mut()?;
        if dialog.pending {
            return Some(vec![]);
        }
        dialog.pending = true;
        dialog.error = None;
        None
    }

    pub fn copy_to_clipboard(&mut self) -> Vec<Effect> {
        if !self.is_share_dialog_visible() {
            return vec![];
        }
        if let Some(effects) = self.begin_dialog_action() {
            return effects;
        }
        vec![Effect::CopyToClipboard {
            session: self.dialog_session,
            text: self.poem.clone(),
        }]
    }

    pub fn share_to_apps(&mut self) -> Vec<Effect> {
        if !self.is_share_dialog_visible() {
            return vec![];
        }
        if let Some(effects) = self.begin_dialog_action() {
            return effects;
        }
        vec![Effect::Share {
            payload: self.payload(),
            origin: ShareOrigin::Dialog(self.dialog_session),
        }]
    }

    /// Is `session` the dialog that's open right now?
    fn is_current_dialog(&self, session: u64) -> bool {
        self.share_dialog.is_some() && session == self.dialog_session
    }

    /// Apply a clipboard result. Results from an earlier dialog opening still
    /// notify but leave the current dialog alone.
    pub fn copy_settled(&mut self, session: u64, result: Result<(), String>) -> Vec<Effect> {
        let current = self.is_current_dialog(session);
        if !current {
            tracing::debug!(session, latest = self.dialog_session, "copy settled after its dialog closed");
        }
        match result {
            Ok(()) => {
                if current {
                    self.share_dialog = None;
                }
                vec![Effect::Notify(Notice::new(MSG_COPIED))]
            }
            Err(msg) => {
                tracing::error!("Error copying poem: {}", msg);
                let notice = Notice::destructive(MSG_COPY_FAILED, &msg, FALLBACK_COPY);
                if current {
                    self.fail_dialog(&notice);
                }
                vec![Effect::Notify(notice)]
            }
        }
    }

    pub fn share_settled(&mut self, origin: ShareOrigin, result: Result<(), String>) -> Vec<Effect> {
        let current = matches!(origin, ShareOrigin::Dialog(session) if self.is_current_dialog(session));
        match result {
            Ok(()) => {
                if current {
                    self.share_dialog = None;
                }
                vec![Effect::Notify(Notice::new(MSG_SHARED))]
            }
            Err(msg) => {
                tracing::error!("Error sharing poem: {}", msg);
                let notice = Notice::destructive(MSG_SHARE_FAILED, &msg, FALLBACK_SHARE);
                if current {
                    self.fail_dialog(&notice);
                }
                vec![Effect::Notify(notice)]
            }
        }
    }

    // The dialog stays open after a failure so the user can retry or pick
    // the other option.
    fn fail_dialog(&mut self, notice: &Notice) {
        if let Some(dialog) = self.share_dialog.as_mut() {
            dialog.pending = false;
            dialog.error = notice.description.clone();
        }
    }
}

impl Default for PoemComposer {
    fn default() -> Self {
        Self::new("Photo Poet")
    }
}
