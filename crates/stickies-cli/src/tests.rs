use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};
use clap::Parser;
use pretty_assertions::assert_eq;
use stickies_core::{Color, Draft, Field, FieldErrors, Modal, Note, NoteId, Snapshot};

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::common::{normalize_note_identifier, parse_color};
use crate::commands::completions::render_completions;
use crate::commands::edit::EditArgs;
use crate::commands::shell::{parse_shell_line, ShellCommand};
use crate::config::{resolve_api_url, resolve_client_config, CliConfigFile};
use crate::error::CliError;
use crate::render::{filter_bar, form_view, note_to_list_item, page_footer, View};

fn sample_note(completed: bool) -> Note {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
    Note {
        id: NoteId::from("42"),
        title: "Buy milk".to_string(),
        description: "Two litres".to_string(),
        labels: vec!["home".to_string(), "errands".to_string()],
        color: Color::Green,
        created_at,
        completed_at: completed.then(|| created_at + chrono::Duration::hours(1)),
    }
}

fn utc_view(styled: bool) -> View<'static, Utc> {
    View {
        tz: &Utc,
        now: Utc.with_ymd_and_hms(2024, 1, 5, 17, 4, 0).unwrap(),
        styled,
    }
}

fn unique_config_path() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("stickies-cli-test-{nanos}-{count}"))
        .join("config.json")
}

#[test]
fn api_url_prefers_flag_then_env_then_file() {
    let file = CliConfigFile {
        api_url: Some("https://file.example.com".to_string()),
        ..CliConfigFile::default()
    };

    assert_eq!(
        resolve_api_url(
            Some("https://flag.example.com".to_string()),
            Some("https://env.example.com".to_string()),
            &file
        )
        .as_deref(),
        Some("https://flag.example.com")
    );
    assert_eq!(
        resolve_api_url(
            Some("  ".to_string()),
            Some("https://env.example.com".to_string()),
            &file
        )
        .as_deref(),
        Some("https://env.example.com")
    );
    assert_eq!(
        resolve_api_url(None, None, &file).as_deref(),
        Some("https://file.example.com")
    );
    assert_eq!(resolve_api_url(None, None, &CliConfigFile::default()), None);
}

#[test]
fn client_config_applies_file_tunables() {
    let file = CliConfigFile {
        api_url: Some("https://api.example.com/".to_string()),
        request_timeout_secs: Some(0),
        filter_debounce_ms: Some(100),
        ..CliConfigFile::default()
    };

    let config = resolve_client_config(None, None, &file).unwrap();
    assert_eq!(config.base_url, "https://api.example.com");
    assert_eq!(config.request_timeout(), None);
    assert_eq!(config.filter_debounce_ms, 500);
}

#[test]
fn client_config_requires_some_url() {
    let error = resolve_client_config(None, None, &CliConfigFile::default()).unwrap_err();
    assert!(matches!(error, CliError::MissingApiUrl));
}

#[test]
fn config_file_round_trips_through_disk() {
    let path = unique_config_path();
    assert_eq!(
        CliConfigFile::load_from_path(&path).unwrap(),
        CliConfigFile::default()
    );

    let config = CliConfigFile {
        version: 0,
        api_url: Some("  https://api.example.com  ".to_string()),
        request_timeout_secs: Some(5),
        filter_debounce_ms: None,
    };
    config.save_to_path(&path).unwrap();

    let loaded = CliConfigFile::load_from_path(&path).unwrap();
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.api_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(loaded.request_timeout_secs, Some(5));

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn note_identifier_is_trimmed_and_required() {
    assert_eq!(
        normalize_note_identifier("  17 ").unwrap(),
        NoteId::from("17")
    );
    assert!(matches!(
        normalize_note_identifier("   "),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn color_argument_accepts_names_and_wire_values() {
    assert_eq!(parse_color(None).unwrap(), None);
    assert_eq!(parse_color(Some("blue")).unwrap(), Some(Color::Blue));
    assert_eq!(parse_color(Some("bg-red-100")).unwrap(), Some(Color::Red));
    assert!(parse_color(Some("mauve")).is_err());
}

#[test]
fn edit_args_must_change_something() {
    assert!(EditArgs::default().is_empty());
    let args = EditArgs {
        labels: Some("a b".to_string()),
        ..EditArgs::default()
    };
    assert!(!args.is_empty());
}

#[test]
fn not_found_errors_point_back_to_list() {
    let error = CliError::from(stickies_core::Error::NotFound("42".to_string()));
    assert_eq!(
        error.to_string(),
        "Note not found: 42. Run `stickies list` to see current notes"
    );

    let error = CliError::from(stickies_core::Error::InvalidInput("bad".to_string()));
    assert_eq!(error.to_string(), "Invalid input: bad");
}

#[test]
fn cli_parses_add_and_global_api_url() {
    let cli = Cli::try_parse_from([
        "stickies",
        "add",
        "--title",
        "Plan",
        "--description",
        "Quarterly",
        "--labels",
        "work q3",
        "--api-url",
        "https://api.example.com",
    ])
    .unwrap();

    assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com"));
    match cli.command {
        Some(Commands::Add {
            title,
            description,
            labels,
            color,
        }) => {
            assert_eq!(title, "Plan");
            assert_eq!(description, "Quarterly");
            assert_eq!(labels, "work q3");
            assert_eq!(color, None);
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn cli_list_defaults_to_first_page() {
    let cli = Cli::try_parse_from(["stickies", "list", "--label", "work"]).unwrap();
    match cli.command {
        Some(Commands::List { label, page, json }) => {
            assert_eq!(label.as_deref(), Some("work"));
            assert_eq!(page, 1);
            assert!(!json);
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn completions_mention_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("stickies"));
}

#[test]
fn shell_parses_commands() {
    assert_eq!(parse_shell_line("   ").unwrap(), None);
    assert_eq!(
        parse_shell_line("filter #work").unwrap(),
        Some(ShellCommand::Filter("work".to_string()))
    );
    assert_eq!(parse_shell_line("filter").unwrap(), Some(ShellCommand::All));
    assert_eq!(parse_shell_line("page 3").unwrap(), Some(ShellCommand::Page(3)));
    assert_eq!(
        parse_shell_line("edit 12").unwrap(),
        Some(ShellCommand::Edit(NoteId::from("12")))
    );
    assert_eq!(
        parse_shell_line("TITLE  Buy milk ").unwrap(),
        Some(ShellCommand::Title("Buy milk".to_string()))
    );
    assert_eq!(
        parse_shell_line("color random").unwrap(),
        Some(ShellCommand::Color(None))
    );
    assert_eq!(
        parse_shell_line("color pink").unwrap(),
        Some(ShellCommand::Color(Some(Color::Pink)))
    );
    assert_eq!(parse_shell_line("q").unwrap(), Some(ShellCommand::Quit));
}

#[test]
fn shell_rejects_bad_input() {
    assert!(parse_shell_line("page two").is_err());
    assert!(parse_shell_line("rm").is_err());
    assert!(parse_shell_line("dance").is_err());
}

#[test]
fn note_card_shows_every_field() {
    let lines = utc_view(false).note_card(&sample_note(false));

    assert_eq!(lines[0], "[ ] Buy milk");
    assert_eq!(lines[1], "    Two litres");
    assert_eq!(lines[2], "    #home #errands");
    assert_eq!(
        lines[3],
        "    id 42 · green · January 5, 2024, 3:04 PM (2h ago)"
    );
}

#[test]
fn completed_note_is_struck_through_when_styled() {
    let plain = utc_view(false).note_card(&sample_note(true));
    assert_eq!(plain[0], "[x] Buy milk");

    let styled = utc_view(true).note_card(&sample_note(true));
    assert_eq!(styled[0], "[x] \x1b[9mBuy milk\x1b[0m");
    assert!(styled[1].contains("\x1b[9mTwo litres"));
}

#[test]
fn empty_list_says_so() {
    assert_eq!(utc_view(false).note_list(&[]), vec!["No notes found."]);
}

#[test]
fn footer_reports_position_and_neighbours() {
    assert_eq!(page_footer(1, 1, false), "        Page 1 of 1");
    assert_eq!(page_footer(1, 3, false), "        Page 1 of 3  next >");
    assert_eq!(page_footer(3, 3, true), "< prev  Page 3 of 3    (loading)");
}

#[test]
fn filter_bar_marks_active_option() {
    let labels = vec!["home".to_string(), "work".to_string()];
    assert_eq!(filter_bar(&labels, ""), "Filter: *All  #home  #work");
    assert_eq!(filter_bar(&labels, "work"), "Filter: All  #home  *#work");
}

#[test]
fn form_view_lists_draft_and_errors() {
    let mut errors = FieldErrors::new();
    errors.insert(Field::Title, "Title is required");
    let snapshot = Snapshot {
        modal: Modal::Editing(NoteId::from("7")),
        draft: Draft {
            title: String::new(),
            description: "body".to_string(),
            labels: "a b".to_string(),
            color: Some(Color::Blue),
            errors,
        },
        ..Snapshot::default()
    };

    let lines = form_view(&snapshot);
    assert_eq!(lines[0], "== Edit note 7 ==");
    assert!(lines.iter().any(|line| line.contains("^ Title is required")));
    assert!(lines.iter().any(|line| line.contains("a b")));
    assert!(lines.iter().any(|line| line.trim_end().ends_with("blue")));
}

#[test]
fn snapshot_view_includes_failure_banner() {
    let snapshot = Snapshot {
        notes: vec![sample_note(false)],
        last_error: Some(stickies_core::Failure {
            kind: stickies_core::FailureKind::Server,
            action: "delete note",
            message: "Server returned HTTP 503: down".to_string(),
        }),
        ..Snapshot::default()
    };

    let lines = utc_view(false).snapshot(&snapshot);
    assert_eq!(lines[0], "Filter: *All");
    assert!(lines.iter().any(|line| line == "[ ] Buy milk"));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("! Could not delete note: Server returned HTTP 503: down (try again)")
    );
}

#[test]
fn list_item_uses_wire_timestamps() {
    let item = note_to_list_item(&sample_note(true));
    assert_eq!(item.id, "42");
    assert_eq!(item.color, "green");
    assert_eq!(item.created_at, "2024-01-05 15:04:00");
    assert_eq!(item.completed_at.as_deref(), Some("2024-01-05 16:04:00"));
    assert!(item.completed);
}
