// Component behavior: photo picker input, share dialog keys, poem scrolling,
// status bar labels, and a full-screen render smoke test.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use photopoet::action::Action;
use photopoet::components::photo_panel::{PhotoPanel, PhotoSummary};
use photopoet::components::photo_picker::PhotoPicker;
use photopoet::components::poem_view::PoemView;
use photopoet::components::share_dialog::{ShareChoice, ShareDialog};
use photopoet::components::status_bar::StatusBar;
use photopoet::components::{centered_overlay, format_size, Component};
use photopoet::composer::{Notice, ShareDialogState, Stage};
use photopoet::photo::PhotoReference;
use photopoet::theme::Theme;
use photopoet::ui::{self, DrawState};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(c: &mut impl Component, text: &str) {
    for ch in text.chars() {
        c.handle_key_event(key(KeyCode::Char(ch))).unwrap();
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut out = vec![];
    while let Ok(a) = rx.try_recv() {
        out.push(a);
    }
    out
}

// ── Photo picker ─────────────────────────────────────────────────────────────

#[test]
fn test_picker_ignores_keys_when_hidden() {
    let mut picker = PhotoPicker::new();
    assert!(!picker.handle_key_event(key(KeyCode::Char('a'))).unwrap());
}

#[test]
fn test_picker_submits_image_path() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut picker = PhotoPicker::new();
    picker.register_action_handler(tx);
    picker.show();

    type_text(&mut picker, "/tmp/cat.png");
    assert_eq!(picker.input(), "/tmp/cat.png");
    picker.handle_key_event(key(KeyCode::Enter)).unwrap();

    assert!(!picker.is_visible());
    let actions = drain(&mut rx);
    assert!(matches!(&actions[..], [Action::LoadPhoto(p)] if p.to_str() == Some("/tmp/cat.png")));
}

#[test]
fn test_picker_rejects_non_image_inline() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut picker = PhotoPicker::new();
    picker.register_action_handler(tx);
    picker.show();

    type_text(&mut picker, "notes.txt");
    picker.handle_key_event(key(KeyCode::Enter)).unwrap();

    assert!(picker.is_visible());
    assert!(picker.error().is_some());
    assert!(drain(&mut rx).is_empty());

    // Editing clears the error.
    picker.handle_key_event(key(KeyCode::Backspace)).unwrap();
    assert!(picker.error().is_none());
}

#[test]
fn test_picker_empty_enter_closes() {
    let mut picker = PhotoPicker::new();
    picker.show();
    picker.handle_key_event(key(KeyCode::Enter)).unwrap();
    assert!(!picker.is_visible());
}

#[test]
fn test_picker_esc_requests_close() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut picker = PhotoPicker::new();
    picker.register_action_handler(tx);
    picker.show();
    picker.handle_key_event(key(KeyCode::Esc)).unwrap();
    assert!(matches!(drain(&mut rx)[..], [Action::ClosePhotoPicker]));
}

#[test]
fn test_picker_paste_drops_trailing_newline() {
    let mut picker = PhotoPicker::new();
    picker.show();
    picker.paste("/tmp/a.png\n");
    assert_eq!(picker.input(), "/tmp/a.png");
}

// ── Share dialog ─────────────────────────────────────────────────────────────

fn open_dialog() -> (ShareDialog, mpsc::UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut dialog = ShareDialog::new();
    dialog.register_action_handler(tx);
    dialog.set_state(Some(&ShareDialogState::default()));
    (dialog, rx)
}

#[test]
fn test_dialog_hidden_ignores_keys() {
    let mut dialog = ShareDialog::new();
    assert!(!dialog.is_visible());
    assert!(!dialog.handle_key_event(key(KeyCode::Enter)).unwrap());
}

#[test]
fn test_dialog_enter_copies_by_default() {
    let (mut dialog, mut rx) = open_dialog();
    assert_eq!(dialog.selected(), ShareChoice::Copy);
    dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
    assert!(matches!(drain(&mut rx)[..], [Action::CopyToClipboard]));
}

#[test]
fn test_dialog_arrow_then_enter_shares_to_apps() {
    let (mut dialog, mut rx) = open_dialog();
    dialog.handle_key_event(key(KeyCode::Down)).unwrap();
    assert_eq!(dialog.selected(), ShareChoice::Apps);
    dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
    assert!(matches!(drain(&mut rx)[..], [Action::ShareToApps]));
}

#[test]
fn test_dialog_shortcuts_and_cancel() {
    let (mut dialog, mut rx) = open_dialog();
    dialog.handle_key_event(key(KeyCode::Char('a'))).unwrap();
    dialog.handle_key_event(key(KeyCode::Char('c'))).unwrap();
    dialog.handle_key_event(key(KeyCode::Esc)).unwrap();
    assert!(matches!(
        drain(&mut rx)[..],
        [Action::ShareToApps, Action::CopyToClipboard, Action::CloseShareDialog]
    ));
}

#[test]
fn test_dialog_reopen_resets_selection() {
    let (mut dialog, _rx) = open_dialog();
    dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
    assert_eq!(dialog.selected(), ShareChoice::Apps);

    dialog.set_state(None);
    dialog.set_state(Some(&ShareDialogState::default()));
    assert_eq!(dialog.selected(), ShareChoice::Copy);
}

#[test]
fn test_share_choice_labels() {
    assert_eq!(ShareChoice::Copy.label(), "Copy to Clipboard");
    assert_eq!(ShareChoice::Apps.label(), "Share to Apps");
}

// ── Poem view ────────────────────────────────────────────────────────────────

#[test]
fn test_poem_view_scroll_is_clamped() {
    let mut view = PoemView::new();
    view.set_poem("one\ntwo\nthree");
    view.update(&Action::ScrollPoem(-5)).unwrap();
    assert_eq!(view.scroll(), 0);
    view.update(&Action::ScrollPoem(10)).unwrap();
    assert_eq!(view.scroll(), 2);
}

#[test]
fn test_poem_view_new_poem_resets_scroll() {
    let mut view = PoemView::new();
    view.set_poem("a\nb\nc");
    view.update(&Action::ScrollPoem(1)).unwrap();
    view.set_poem("a\nb\nc");
    assert_eq!(view.scroll(), 1);
    view.set_poem("fresh");
    assert_eq!(view.scroll(), 0);
    assert_eq!(view.poem(), "fresh");
}

// ── Photo panel & status bar ─────────────────────────────────────────────────

#[test]
fn test_photo_summary() {
    let photo = PhotoReference::from_bytes("image/jpeg", &[0; 2048]).with_file_name("me.jpg");
    assert_eq!(
        PhotoSummary::of(&photo),
        PhotoSummary {
            name: "me.jpg".into(),
            mime: "image/jpeg".into(),
            size: "2.0 KB".into(),
        }
    );

    let mut panel = PhotoPanel::new();
    panel.set_photo(Some(&photo));
    assert_eq!(panel.summary().map(|s| s.name.as_str()), Some("me.jpg"));
    panel.set_photo(None);
    assert!(panel.summary().is_none());
}

#[test]
fn test_status_bar_generate_label() {
    let mut bar = StatusBar::new();
    assert_eq!(bar.generate_label(), " Generate Poem");
    bar.set_stage(Stage::Generating);
    assert_eq!(bar.generate_label(), " Generating...");
}

#[test]
fn test_format_size() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
}

#[test]
fn test_centered_overlay_clamps_to_area() {
    let area = ratatui::layout::Rect::new(0, 0, 40, 10);
    let r = centered_overlay(area, 20, 4);
    assert_eq!((r.x, r.y, r.width, r.height), (10, 3, 20, 4));
    let big = centered_overlay(area, 100, 100);
    assert_eq!((big.width, big.height), (40, 10));
}

// ── Rendering ────────────────────────────────────────────────────────────────

fn render_to_string(state: &DrawState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, state)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_screen_renders_poem_notice_and_dialog() {
    let mut poem_view = PoemView::new();
    poem_view.set_poem("Roses bloom");
    let mut share_dialog = ShareDialog::new();
    share_dialog.set_state(Some(&ShareDialogState::default()));
    let notice = Some(Notice::new("Copied to clipboard!"));
    let theme = Theme::default();

    let state = DrawState {
        photo_panel: &PhotoPanel::new(),
        poem_view: &poem_view,
        status_bar: &StatusBar::new(),
        photo_picker: &PhotoPicker::new(),
        share_dialog: &share_dialog,
        notice: &notice,
        show_help: false,
        theme: &theme,
    };
    let screen = render_to_string(&state);

    assert!(screen.contains("Photo Poet"));
    assert!(screen.contains("Roses bloom"));
    assert!(screen.contains("Copied to clipboard!"));
    assert!(screen.contains("Copy to Clipboard"));
    assert!(screen.contains("Share to Apps"));
}
