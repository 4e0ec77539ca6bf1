// Right panel: the generated poem, or a spinner while it's being written.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{spinner_frame, Component};
use crate::theme::Theme;

#[derive(Default)]
pub struct PoemView {
    action_tx: Option<UnboundedSender<Action>>,
    poem: String,
    loading: bool,
    scroll: u16,
    frame_count: u64,
}

impl PoemView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed poem. Scrolling resets when the text changes.
    pub fn set_poem(&mut self, poem: &str) {
        if self.poem != poem {
            self.poem = poem.to_string();
            self.scroll = 0;
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn poem(&self) -> &str {
        &self.poem
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.poem.lines().count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

impl Component for PoemView {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
            }
            Action::ScrollPoem(delta) => {
                let next = i32::from(self.scroll) + i32::from(*delta);
                self.scroll = next.clamp(0, i32::from(self.max_scroll())) as u16;
            }
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_color = if self.loading {
            theme.warning
        } else if self.poem.is_empty() {
            theme.border
        } else {
            theme.primary
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Poem ");

        let lines: Vec<Line> = if self.loading {
            vec![Line::from(Span::styled(
                format!("{} Generating…", spinner_frame(self.frame_count)),
                Style::default().fg(theme.warning),
            ))]
        } else if self.poem.is_empty() {
            vec![Line::from(Span::styled(
                "Load a photo and press g to generate a poem.",
                Style::default().fg(theme.text_dim),
            ))]
        } else {
            self.poem
                .lines()
                .map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::default()
                            .fg(theme.text)
                            .add_modifier(Modifier::ITALIC),
                    ))
                })
                .collect()
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}
