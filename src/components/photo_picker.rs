// Modal prompt for the path of a photo to load (press `o` to open).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{centered_overlay, Component};
use crate::photo::{mime_for_path, normalize_path};
use crate::theme::Theme;

#[derive(Default)]
pub struct PhotoPicker {
    action_tx: Option<UnboundedSender<Action>>,
    visible: bool,
    input: String,
    error: Option<String>,
}

impl PhotoPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.input.clear();
        self.error = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.input.clear();
        self.error = None;
    }

    /// Append pasted text (terminals paste dropped files as their path).
    pub fn paste(&mut self, text: &str) {
        self.input.push_str(text.trim_end_matches(['\n', '\r']));
        self.error = None;
    }

    fn submit(&mut self) {
        if self.input.trim().is_empty() {
            self.hide();
            return;
        }
        let path = normalize_path(&self.input);
        if mime_for_path(&path).is_none() {
            self.error = Some("Not an image file (png, jpg, gif, webp, …)".to_string());
            return;
        }
        if let Some(tx) = &self.action_tx {
            tx.send(Action::LoadPhoto(path)).ok();
        }
        self.hide();
    }
}

impl Component for PhotoPicker {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if !self.visible {
            return Ok(false);
        }

        match key.code {
            KeyCode::Esc => {
                if let Some(tx) = &self.action_tx {
                    tx.send(Action::ClosePhotoPicker).ok();
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            _ => {}
        }

        Ok(true)
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let overlay_area = centered_overlay(area, 70, 6);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Open photo ")
            .title_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let prompt = Line::from(vec![
            Span::styled("Path: ", Style::default().fg(theme.accent)),
            Span::raw(&self.input),
            Span::styled("█", Style::default().fg(theme.text)),
        ]);
        let hint = Line::from(Span::styled(
            "  Enter to load · Esc to cancel · paste or drop a file",
            Style::default().fg(theme.text_dim),
        ));
        let error_line = match &self.error {
            Some(err) => Line::from(Span::styled(
                format!("  {}", err),
                Style::default().fg(theme.error),
            )),
            None => Line::from(""),
        };

        frame.render_widget(Paragraph::new(vec![prompt, hint, error_line]), inner);
    }
}
