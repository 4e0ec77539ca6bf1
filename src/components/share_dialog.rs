// "Copy or share?" dialog shown before a poem leaves the app.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::composer::ShareDialogState;
use crate::components::{centered_overlay, Component};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShareChoice {
    #[default]
    Copy,
    Apps,
}

impl ShareChoice {
    pub fn label(self) -> &'static str {
        match self {
            ShareChoice::Copy => "Copy to Clipboard",
            ShareChoice::Apps => "Share to Apps",
        }
    }

    fn other(self) -> Self {
        match self {
            ShareChoice::Copy => ShareChoice::Apps,
            ShareChoice::Apps => ShareChoice::Copy,
        }
    }

    fn action(self) -> Action {
        match self {
            ShareChoice::Copy => Action::CopyToClipboard,
            ShareChoice::Apps => Action::ShareToApps,
        }
    }
}

#[derive(Default)]
pub struct ShareDialog {
    action_tx: Option<UnboundedSender<Action>>,
    state: Option<ShareDialogState>,
    selected: ShareChoice,
}

impl ShareDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_some()
    }

    pub fn selected(&self) -> ShareChoice {
        self.selected
    }

    /// Mirror the composer's dialog state. Opening resets the selection.
    pub fn set_state(&mut self, state: Option<&ShareDialogState>) {
        if self.state.is_none() && state.is_some() {
            self.selected = ShareChoice::default();
        }
        self.state = state.cloned();
    }

    fn send(&self, action: Action) {
        if let Some(tx) = &self.action_tx {
            tx.send(action).ok();
        }
    }
}

impl Component for ShareDialog {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if !self.is_visible() {
            return Ok(false);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.send(Action::CloseShareDialog),
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => self.selected = self.selected.other(),
            KeyCode::Enter => self.send(self.selected.action()),
            KeyCode::Char('c') => {
                self.selected = ShareChoice::Copy;
                self.send(Action::CopyToClipboard);
            }
            KeyCode::Char('a') => {
                self.selected = ShareChoice::Apps;
                self.send(Action::ShareToApps);
            }
            _ => {}
        }

        Ok(true)
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(state) = &self.state else {
            return;
        };

        let overlay_area = centered_overlay(area, 44, 10);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Share poem ")
            .title_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let mut lines = vec![
            Line::from(Span::styled(
                " How would you like to share it?",
                Style::default().fg(theme.text),
            )),
            Line::from(""),
        ];
        for (choice, key) in [(ShareChoice::Copy, "c"), (ShareChoice::Apps, "a")] {
            let style = if choice == self.selected {
                Style::default()
                    .fg(theme.primary)
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let marker = if choice == self.selected { "▶" } else { " " };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} {}", marker, choice.label()), style),
                Span::styled(format!("  ({})", key), Style::default().fg(theme.text_dim)),
            ]));
        }
        lines.push(Line::from(""));

        if state.pending {
            lines.push(Line::from(Span::styled(
                " Working…",
                Style::default().fg(theme.warning),
            )));
        } else if let Some(err) = &state.error {
            lines.push(Line::from(Span::styled(
                format!(" {}", err),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " Enter to choose · Esc to cancel",
                Style::default().fg(theme.text_dim),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
