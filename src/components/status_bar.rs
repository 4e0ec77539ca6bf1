// Bottom status bar: where the flow stands and the keys that move it along.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::composer::Stage;
use crate::components::{spinner_frame, Component};
use crate::theme::Theme;

pub struct StatusBar {
    action_tx: Option<UnboundedSender<Action>>,
    stage: Stage,
    frame_count: u64,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self {
            action_tx: None,
            stage: Stage::Idle,
            frame_count: 0,
        }
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Label of the generate key, as the button reads in each stage.
    pub fn generate_label(&self) -> &'static str {
        match self.stage {
            Stage::Generating => " Generating...",
            _ => " Generate Poem",
        }
    }
}

impl Component for StatusBar {
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
        let (status, status_color) = match self.stage {
            Stage::Idle => ("○ Waiting for a photo".to_string(), theme.text_dim),
            Stage::PhotoLoaded => ("● Photo ready".to_string(), theme.accent),
            Stage::Generating => (
                format!("{} Writing poem", spinner_frame(self.frame_count)),
                theme.warning,
            ),
            Stage::PoemReady => ("✎ Poem ready".to_string(), theme.success),
            Stage::ShareDialogOpen => ("↗ Sharing".to_string(), theme.primary),
        };

        let div = Span::styled(" │ ", Style::default().fg(theme.border));
        let key_style = Style::default().fg(theme.text);
        let desc_style = Style::default().fg(theme.text_dim);
        let poem_ready = matches!(self.stage, Stage::PoemReady | Stage::ShareDialogOpen);

        let mut line1 = vec![
            Span::styled(
                format!(" {} ", status),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            div.clone(),
            Span::styled("o", key_style),
            Span::styled(" Open photo", desc_style),
            div.clone(),
            Span::styled("g", key_style),
            Span::styled(self.generate_label(), desc_style),
        ];
        if self.stage == Stage::Generating {
            line1.push(div.clone());
            line1.push(Span::styled("x", key_style));
            line1.push(Span::styled(" Cancel", desc_style));
        }
        if poem_ready {
            line1.push(div.clone());
            line1.push(Span::styled("s", key_style));
            line1.push(Span::styled(" Share Poem", desc_style));
        }

        let line2 = vec![
            Span::raw("   "),
            Span::styled("j/k", key_style),
            Span::styled(" Scroll", desc_style),
            div.clone(),
            Span::styled("?", key_style),
            Span::styled(" Help", desc_style),
            div,
            Span::styled("q", key_style),
            Span::styled(" Quit", desc_style),
        ];

        let border_color = if self.stage == Stage::Generating {
            theme.warning
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let paragraph = Paragraph::new(vec![Line::from(line1), Line::from(line2)]).block(block);
        frame.render_widget(paragraph, area);
    }
}
