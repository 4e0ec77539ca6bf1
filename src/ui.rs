// Layout and rendering: splits the terminal into the photo and poem panels,
// and composites overlays (photo prompt, share dialog, help, notice bar).

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::components::photo_panel::PhotoPanel;
use crate::components::photo_picker::PhotoPicker;
use crate::components::poem_view::PoemView;
use crate::components::share_dialog::ShareDialog;
use crate::components::status_bar::StatusBar;
use crate::components::{centered_overlay, Component};
use crate::composer::Notice;
use crate::theme::Theme;

pub struct DrawState<'a> {
    pub photo_panel: &'a PhotoPanel,
    pub poem_view: &'a PoemView,
    pub status_bar: &'a StatusBar,
    pub photo_picker: &'a PhotoPicker,
    pub share_dialog: &'a ShareDialog,
    pub notice: &'a Option<Notice>,
    pub show_help: bool,
    pub theme: &'a Theme,
}

pub fn draw(frame: &mut Frame, state: &DrawState) {
    let theme = state.theme;
    let notice_height = if state.notice.is_some() { 1 } else { 0 };
    let outer = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(notice_height),
        Constraint::Length(4),
    ])
    .split(frame.area());

    draw_header(frame, outer[0], theme);

    let main = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(outer[1]);
    state.photo_panel.draw(frame, main[0], theme);
    state.poem_view.draw(frame, main[1], theme);

    if let Some(notice) = state.notice {
        draw_notice(frame, outer[2], notice, theme);
    }

    state.status_bar.draw(frame, outer[3], theme);

    if state.photo_picker.is_visible() {
        state.photo_picker.draw(frame, frame.area(), theme);
    }
    if state.share_dialog.is_visible() {
        state.share_dialog.draw(frame, frame.area(), theme);
    }
    if state.show_help {
        draw_help_overlay(frame, theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " Photo Poet ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Upload a photo and let AI generate a poem for you.",
            Style::default().fg(theme.text_dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_notice(frame: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let (icon, color) = if notice.is_destructive() {
        (" ⚠ ", theme.error)
    } else {
        (" ✓ ", theme.success)
    };
    let mut spans = vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::styled(
            notice.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(description) = &notice.description {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            description.as_str(),
            Style::default().fg(theme.text),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_overlay(frame: &mut Frame, theme: &Theme) {
    let overlay_area = centered_overlay(frame.area(), 50, 20);
    frame.render_widget(Clear, overlay_area);

    let keybindings = [
        ("o", "Open a photo"),
        ("(paste)", "Load a pasted or dropped path"),
        ("g / Enter", "Generate poem"),
        ("x / Esc", "Cancel generation"),
        ("s", "Share poem"),
        ("j / Down", "Scroll down"),
        ("k / Up", "Scroll up"),
        ("?", "Toggle this help overlay"),
        ("q", "Quit"),
        ("", ""),
        ("c", "Share dialog: copy to clipboard"),
        ("a", "Share dialog: share to apps"),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " Keybindings ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, desc) in &keybindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), Style::default().fg(theme.accent)),
            Span::raw(*desc),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(theme.text_dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .title_alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
