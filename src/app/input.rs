// Key and paste handling: maps terminal input to actions.

use crate::action::Action;
use crate::app::App;
use crate::components::Component;
use crate::photo::normalize_path;
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        use KeyCode::{Char, Down, Enter, Esc, PageDown, PageUp, Up};

        // Overlays consume all keys
        if self.show_help {
            self.action_tx.send(Action::HideHelp)?;
            return Ok(());
        }
        if self.photo_picker.is_visible() {
            self.photo_picker.handle_key_event(key)?;
            return Ok(());
        }
        if self.share_dialog.is_visible() {
            self.share_dialog.handle_key_event(key)?;
            return Ok(());
        }

        match key.code {
            Char('q') => self.action_tx.send(Action::Quit)?,
            Char('?') => self.action_tx.send(Action::ShowHelp)?,
            Char('o') => self.action_tx.send(Action::OpenPhotoPicker)?,
            Char('g') | Enter => self.action_tx.send(Action::Generate)?,
            Char('x') => self.action_tx.send(Action::CancelGeneration)?,
            Esc if self.composer.is_loading() => self.action_tx.send(Action::CancelGeneration)?,
            Char('s') => self.action_tx.send(Action::Share)?,
            Char('j') | Down => self.action_tx.send(Action::ScrollPoem(1))?,
            Char('k') | Up => self.action_tx.send(Action::ScrollPoem(-1))?,
            PageDown => self.action_tx.send(Action::ScrollPoem(10))?,
            PageUp => self.action_tx.send(Action::ScrollPoem(-10))?,
            _ => {}
        }
        Ok(())
    }

    /// Pasted text is a photo path: into the prompt if it's open, otherwise
    /// loaded straight away.
    pub fn handle_paste(&mut self, text: &str) -> anyhow::Result<()> {
        if self.photo_picker.is_visible() {
            self.photo_picker.paste(text);
            return Ok(());
        }
        if self.show_help || self.share_dialog.is_visible() || text.trim().is_empty() {
            return Ok(());
        }
        self.action_tx.send(Action::LoadPhoto(normalize_path(text)))?;
        Ok(())
    }
}
