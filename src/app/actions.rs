// Action dispatch: routes each Action variant to the composer or a component,
// then carries out whatever effects the composer asked for.

use crate::action::Action;
use crate::app::App;
use crate::components::Component;

impl App {
    pub async fn handle_action(&mut self, action: Action) -> anyhow::Result<()> {
        let effects = match action {
            // Lifecycle
            Action::Quit => {
                self.abort_running_generation();
                self.running = false;
                vec![]
            }

            // Photo intake
            Action::OpenPhotoPicker => {
                self.photo_picker.show();
                vec![]
            }
            Action::ClosePhotoPicker => {
                self.photo_picker.hide();
                vec![]
            }
            Action::LoadPhoto(path) => self.composer.request_photo(path),
            Action::PhotoRead { request, result } => self.composer.photo_read(request, result),

            // Generation
            Action::Generate => self.composer.generate(),
            Action::CancelGeneration => self.composer.cancel_generation(),
            Action::PoemGenerated { token, result } => {
                if matches!(self.generation_task, Some((t, _)) if t == token) {
                    self.generation_task = None;
                }
                self.composer.generation_settled(token, result)
            }

            // Sharing
            Action::Share => {
                if self.config.share.confirm {
                    self.composer.request_share()
                } else {
                    self.composer.share()
                }
            }
            Action::CloseShareDialog => self.composer.dismiss_share_dialog(),
            Action::CopyToClipboard => self.composer.copy_to_clipboard(),
            Action::ShareToApps => self.composer.share_to_apps(),
            Action::ClipboardWritten { session, result } => self.composer.copy_settled(session, result),
            Action::ShareFinished { origin, result } => self.composer.share_settled(origin, result),

            // Notices & help
            Action::ShowNotice(notice) => {
                self.show_notice(notice);
                vec![]
            }
            Action::ClearNotice(id) => {
                if id == self.notice_id {
                    self.notice = None;
                }
                vec![]
            }
            Action::ShowHelp => {
                self.show_help = true;
                vec![]
            }
            Action::HideHelp => {
                self.show_help = false;
                vec![]
            }

            // Forward anything unhandled to components
            action => {
                for component in [
                    &mut self.photo_panel as &mut dyn Component,
                    &mut self.poem_view,
                    &mut self.status_bar,
                ] {
                    for follow_up in component.update(&action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
                vec![]
            }
        };

        self.apply_effects(effects);
        self.sync_components();
        Ok(())
    }
}
