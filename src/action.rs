// Every user interaction, async result, and internal event is represented as an
// Action variant. The App event loop dispatches these to the composer and components.

use std::path::PathBuf;

use crate::api::models::GeneratePoemOutput;
use crate::composer::{Notice, ShareOrigin};
use crate::photo::PhotoReference;

/// All events flowing through the app: user actions, async results, and
/// internal signals. The [`App`](crate::app::App) event loop dispatches
/// each variant to the appropriate handler.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,

    OpenPhotoPicker,
    ClosePhotoPicker,
    LoadPhoto(PathBuf),
    PhotoRead {
        request: u64,
        result: Result<PhotoReference, String>,
    },

    Generate,
    CancelGeneration,
    PoemGenerated {
        token: u64,
        result: Result<GeneratePoemOutput, String>,
    },

    /// Share the poem: through the dialog, or directly when confirmation is off.
    Share,
    CloseShareDialog,
    CopyToClipboard,
    ShareToApps,
    ClipboardWritten {
        session: u64,
        result: Result<(), String>,
    },
    ShareFinished {
        origin: ShareOrigin,
        result: Result<(), String>,
    },

    ScrollPoem(i16),

    ShowNotice(Notice),
    ClearNotice(u64),
    ShowHelp,
    HideHelp,
    Tick,
}
