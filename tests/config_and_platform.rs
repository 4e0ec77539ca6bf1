// Config parsing and defaults, themes, and the clipboard/share commands.

use std::time::Duration;

use photopoet::config::{Config, ShareFormat};
use photopoet::platform::clipboard::{Clipboard, CommandClipboard, Osc52Clipboard};
use photopoet::platform::share::{CommandShare, SharePayload, ShareTarget, UnavailableShare};
use photopoet::platform::PlatformError;
use photopoet::theme::Theme;

// ── Config ───────────────────────────────────────────────────────────────────

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.general.frame_rate, 30.0);
    assert_eq!(config.general.theme, "dark");
    assert_eq!(config.general.notice_secs, 5);
    assert_eq!(config.generator.endpoint, "http://127.0.0.1:3400/generatePoem");
    assert_eq!(config.generator.timeout_secs, 60);
    assert!(config.generator.envelope);
    assert!(config.generator.api_key.is_none());
    assert_eq!(config.share.title, "Photo Poet");
    assert!(config.share.confirm);
    assert!(config.share.command.is_empty());
    assert_eq!(config.share.format, ShareFormat::Text);
    assert!(config.clipboard.command.is_empty());
}

#[test]
fn test_empty_config_file_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.generator.timeout_secs, 60);
    assert!(config.share.confirm);
}

#[test]
fn test_partial_config_overrides_only_given_fields() {
    let config = Config::parse(
        r#"
        [general]
        theme = "light"

        [generator]
        endpoint = "https://poems.example.com/flow"
        timeout_secs = 15
        envelope = false

        [share]
        confirm = false
        command = ["my-share", "--stdin"]
        format = "json"

        [clipboard]
        command = ["xclip", "-selection", "clipboard"]
        "#,
    )
    .unwrap();

    assert_eq!(config.general.theme, "light");
    assert_eq!(config.general.frame_rate, 30.0);
    assert_eq!(config.generator.endpoint, "https://poems.example.com/flow");
    assert_eq!(config.generator.timeout_secs, 15);
    assert!(!config.generator.envelope);
    assert!(!config.share.confirm);
    assert_eq!(config.share.title, "Photo Poet");
    assert_eq!(config.share.command, vec!["my-share", "--stdin"]);
    assert_eq!(config.share.format, ShareFormat::Json);
    assert_eq!(config.clipboard.command.len(), 3);
}

#[test]
fn test_invalid_config_is_an_error() {
    assert!(Config::parse("[generator]\ntimeout_secs = \"soon\"").is_err());
}

#[test]
fn test_load_from_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config.general.notice_secs, 5);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\nnotice_secs = 9\n").unwrap();
    assert_eq!(Config::load_from(&path).unwrap().general.notice_secs, 9);
}

#[test]
fn test_config_path_ends_with_app_dir() {
    let path = Config::config_path();
    assert!(path.ends_with("photopoet/config.toml"));
}

// ── Theme ────────────────────────────────────────────────────────────────────

#[test]
fn test_theme_from_name() {
    assert_eq!(Theme::from_name("light"), Theme::light());
    assert_eq!(Theme::from_name("dark"), Theme::dark());
    assert_eq!(Theme::from_name("unknown"), Theme::dark());
}

// ── Clipboard ────────────────────────────────────────────────────────────────

fn payload() -> SharePayload {
    SharePayload {
        title: "Photo Poet".into(),
        text: "Roses bloom".into(),
        url: "data:image/png;base64,AAA".into(),
    }
}

fn sh(script: String) -> Vec<String> {
    vec!["sh".into(), "-c".into(), script]
}

#[test]
fn test_osc52_sequence() {
    assert_eq!(Osc52Clipboard::sequence("hi"), "\x1b]52;c;aGk=\x07");
}

#[tokio::test]
async fn test_command_clipboard_pipes_text() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clip.txt");
    let clipboard = CommandClipboard::new(sh(format!("cat > '{}'", out.display())));

    clipboard.write_text("Roses bloom").await.unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "Roses bloom");
}

#[tokio::test]
async fn test_command_clipboard_reports_failure() {
    let clipboard = CommandClipboard::new(sh("echo broken >&2; exit 3".into()));
    let err = clipboard.write_text("x").await.unwrap_err();
    match err {
        PlatformError::CommandFailed { stderr, .. } => assert_eq!(stderr, "broken"),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_copy_settles_when_command_leaves_a_background_child() {
    // Like xclip: the command exits but a forked child keeps stderr open.
    let clipboard = CommandClipboard::new(sh("cat >/dev/null; sleep 20 & exit 0".into()));
    let result = tokio::time::timeout(Duration::from_secs(3), clipboard.write_text("poem")).await;
    assert!(matches!(result, Ok(Ok(()))), "copy did not settle: {:?}", result);
}

#[tokio::test]
async fn test_failed_command_with_background_child_still_reports() {
    let clipboard = CommandClipboard::new(sh("echo broken >&2; sleep 20 & exit 4".into()));
    let result = tokio::time::timeout(Duration::from_secs(3), clipboard.write_text("x"))
        .await
        .expect("copy did not settle");
    assert!(matches!(result, Err(PlatformError::CommandFailed { .. })));
}

#[tokio::test]
async fn test_missing_program_is_spawn_error() {
    let clipboard = CommandClipboard::new(vec!["definitely-not-a-real-copy-tool".into()]);
    let err = clipboard.write_text("x").await.unwrap_err();
    assert!(matches!(err, PlatformError::Spawn { .. }));
}

#[tokio::test]
async fn test_empty_command_is_unavailable() {
    let err = CommandClipboard::new(vec![]).write_text("x").await.unwrap_err();
    assert!(matches!(err, PlatformError::Unavailable(_)));
}

// ── Share ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_command_share_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("share.txt");
    let share = CommandShare::new(
        sh(format!(
            "printf '%s|' \"$PHOTOPOET_SHARE_TITLE\" > '{0}'; cat >> '{0}'",
            out.display()
        )),
        ShareFormat::Text,
    );

    share.share(&payload()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "Photo Poet|Roses bloom");
}

#[test]
fn test_command_share_json_payload() {
    let share = CommandShare::new(vec!["true".into()], ShareFormat::Json);
    let bytes = share.stdin_for(&payload()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Photo Poet",
            "text": "Roses bloom",
            "url": "data:image/png;base64,AAA",
        })
    );
}

#[tokio::test]
async fn test_unavailable_share_fails_with_message() {
    let err = UnavailableShare.share(&payload()).await.unwrap_err();
    assert_eq!(err.to_string(), "Sharing is not available on this system");
}
