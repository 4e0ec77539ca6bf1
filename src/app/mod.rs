// Central coordinator: owns the composer, the components, and the platform services.
// Runs the event loop (key → Action → handle_action → composer effects → draw).

mod actions;
mod effects;
mod input;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;
use crate::api::poem::{HttpPoemGenerator, PoemGenerator};
use crate::components::photo_panel::PhotoPanel;
use crate::components::photo_picker::PhotoPicker;
use crate::components::poem_view::PoemView;
use crate::components::share_dialog::ShareDialog;
use crate::components::status_bar::StatusBar;
use crate::components::Component;
use crate::composer::{Notice, PoemComposer};
use crate::config::Config;
use crate::platform::clipboard::{system_clipboard, Clipboard};
use crate::platform::share::{system_share, ShareTarget};
use crate::theme::Theme;
use crate::tui::{Tui, TuiEvent};
use crate::ui;

/// The external collaborators the composer's effects are carried out with.
#[derive(Clone)]
pub struct Services {
    pub generator: Arc<dyn PoemGenerator>,
    pub clipboard: Arc<dyn Clipboard>,
    pub share: Arc<dyn ShareTarget>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generator: Arc::new(HttpPoemGenerator::new(&config.generator)),
            clipboard: system_clipboard(&config.clipboard.command),
            share: system_share(&config.share),
        }
    }
}

/// Top-level coordinator: owns the poem composer, every component, and the
/// services used for generation, copying and sharing.
pub struct App {
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    // Components
    pub photo_picker: PhotoPicker,
    pub photo_panel: PhotoPanel,
    pub poem_view: PoemView,
    pub share_dialog: ShareDialog,
    pub status_bar: StatusBar,

    // State
    pub composer: PoemComposer,
    services: Services,
    pub config: Config,
    pub theme: Theme,
    pub show_help: bool,
    pub notice: Option<Notice>,
    notice_id: u64,
    /// Generation task currently running, keyed by its request token.
    generation_task: Option<(u64, AbortHandle)>,
    startup_photo: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let services = Services::from_config(&config);
        Self::with_services(config, services)
    }

    pub fn with_services(config: Config, services: Services) -> anyhow::Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut photo_picker = PhotoPicker::new();
        let mut photo_panel = PhotoPanel::new();
        let mut poem_view = PoemView::new();
        let mut share_dialog = ShareDialog::new();
        let mut status_bar = StatusBar::new();

        for component in [
            &mut photo_picker as &mut dyn Component,
            &mut photo_panel,
            &mut poem_view,
            &mut share_dialog,
            &mut status_bar,
        ] {
            component.register_action_handler(action_tx.clone());
        }

        Ok(Self {
            running: true,
            action_tx,
            action_rx,
            photo_picker,
            photo_panel,
            poem_view,
            share_dialog,
            status_bar,
            composer: PoemComposer::new(config.share.title.clone()),
            services,
            theme: Theme::from_name(&config.general.theme),
            config,
            show_help: false,
            notice: None,
            notice_id: 0,
            generation_task: None,
            startup_photo: None,
        })
    }

    /// Load `path` as soon as the event loop starts.
    pub fn with_photo(mut self, path: Option<PathBuf>) -> Self {
        self.startup_photo = path;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut tui = Tui::new(self.config.general.frame_rate)?;
        tui.enter()?;

        if let Some(path) = self.startup_photo.take() {
            self.action_tx.send(Action::LoadPhoto(path))?;
        }

        while self.running {
            let state = ui::DrawState {
                photo_panel: &self.photo_panel,
                poem_view: &self.poem_view,
                status_bar: &self.status_bar,
                photo_picker: &self.photo_picker,
                share_dialog: &self.share_dialog,
                notice: &self.notice,
                show_help: self.show_help,
                theme: &self.theme,
            };
            tui.draw(|frame| ui::draw(frame, &state))?;

            tokio::select! {
                Some(event) = tui.event_rx.recv() => {
                    match event {
                        TuiEvent::Key(key) => self.handle_key(key)?,
                        TuiEvent::Paste(text) => self.handle_paste(&text)?,
                        TuiEvent::Resize => {} // ratatui redraws at correct size automatically
                        TuiEvent::Tick => { self.action_tx.send(Action::Tick)?; }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await?;
                }
            }
        }

        tui.exit()?;
        Ok(())
    }

    /// Push the composer's state into the components that display it.
    fn sync_components(&mut self) {
        self.photo_panel.set_photo(self.composer.photo());
        self.photo_panel.set_reading(self.composer.is_reading_photo());
        self.poem_view.set_poem(self.composer.poem());
        self.poem_view.set_loading(self.composer.is_loading());
        self.share_dialog.set_state(self.composer.share_dialog());
        self.status_bar.set_stage(self.composer.stage());
    }

    #[allow(dead_code)] // used by integration tests
    pub async fn flush_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            let _ = self.handle_action(action).await;
        }
    }

    /// Wait for the next queued action, e.g. the result of a spawned task.
    #[allow(dead_code)] // used by integration tests
    pub async fn next_action(&mut self, timeout: Duration) -> Option<Action> {
        tokio::time::timeout(timeout, self.action_rx.recv())
            .await
            .ok()
            .flatten()
    }
}
