// Left panel: what photo is loaded, or how to load one.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{format_size, spinner_frame, Component};
use crate::photo::PhotoReference;
use crate::theme::Theme;

/// Display details of the loaded photo. The data URL itself is never kept here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSummary {
    pub name: String,
    pub mime: String,
    pub size: String,
}

impl PhotoSummary {
    pub fn of(photo: &PhotoReference) -> Self {
        Self {
            name: photo.file_name().unwrap_or("(unnamed)").to_string(),
            mime: photo.mime().unwrap_or("unknown").to_string(),
            size: format_size(photo.byte_len()),
        }
    }
}

#[derive(Default)]
pub struct PhotoPanel {
    action_tx: Option<UnboundedSender<Action>>,
    summary: Option<PhotoSummary>,
    reading: bool,
    frame_count: u64,
}

impl PhotoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_photo(&mut self, photo: Option<&PhotoReference>) {
        self.summary = photo.map(PhotoSummary::of);
    }

    pub fn set_reading(&mut self, reading: bool) {
        self.reading = reading;
    }

    pub fn summary(&self) -> Option<&PhotoSummary> {
        self.summary.as_ref()
    }
}

impl Component for PhotoPanel {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        if let Action::Tick = action {
            self.frame_count = self.frame_count.wrapping_add(1);
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label = Style::default().fg(theme.text_dim);
        let value = Style::default().fg(theme.text);

        let mut lines = match &self.summary {
            Some(summary) => vec![
                Line::from(Span::styled(
                    summary.name.clone(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Type  ", label),
                    Span::styled(summary.mime.clone(), value),
                ]),
                Line::from(vec![
                    Span::styled("Size  ", label),
                    Span::styled(summary.size.clone(), value),
                ]),
            ],
            None => vec![
                Line::from(Span::styled("No photo yet.", value)),
                Line::from(""),
                Line::from(Span::styled(
                    "Press o to open one, or paste its path.",
                    label,
                )),
            ],
        };

        if self.reading {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} Reading photo…", spinner_frame(self.frame_count)),
                Style::default().fg(theme.warning),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Photo ");
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
