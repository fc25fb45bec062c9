// Dataentry Integration Tests
//
// These tests drive the entry context through its public API:
// config -> controls -> buffer -> auto-enter -> history
//
// Run with: cargo test -p dataentry-core --test integration_test

use std::time::{Duration, Instant};

use dataentry_core::{
    format, AfterEntry, AutoEnter, AutoEnterConfig, Config, ControlAction, CopyMode,
    CriteriaLogic, DataEntry, EntryBuffer, EntryPattern, InactivityTimer, LatchMode,
    ModifierLatches, Outcome, Trigger,
};

// =========================================================================
// Helpers
// =========================================================================

fn press_all(entry: &mut DataEntry, controls: &[&str], now: Instant) -> Vec<Outcome> {
    controls
        .iter()
        .map(|c| entry.on_control_pressed_at(c, None, now))
        .collect()
}

fn auto_enter(config: AutoEnterConfig) -> Config {
    Config {
        auto_enter: config,
        ..Config::default()
    }
}

// =========================================================================
// Entry buffer
// =========================================================================

#[test]
fn test_insert_then_delete_restores_buffer() {
    for (raw, cursor) in [("", 0), ("abc", 0), ("abc", 2), ("abc", 3), ("ü€x", 1)] {
        let mut buffer = EntryBuffer::new(64);
        buffer.set(raw);
        buffer.move_cursor(dataentry_core::CursorMove::To(cursor));

        let inserted = "12é";
        buffer.insert(inserted);
        assert_eq!(buffer.delete_at(cursor, inserted.chars().count()), 3);

        assert_eq!(buffer.raw(), raw);
        assert_eq!(buffer.cursor(), cursor);
    }
}

#[test]
fn test_truncation_keeps_exact_max_length() {
    let mut buffer = EntryBuffer::new(5);
    buffer.insert("1234");
    buffer.insert("567890");
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.raw(), "12345");
    assert_eq!(buffer.cursor(), 5);
}

// =========================================================================
// Auto-enter evaluator
// =========================================================================

#[test]
fn test_or_mode_raw_length_threshold() {
    let auto = AutoEnter::new(AutoEnterConfig {
        on_raw_length: true,
        raw_length: 4,
        ..AutoEnterConfig::default()
    });
    assert!(auto.should_enter("1234", String::new, Trigger::Input));
    assert!(!auto.should_enter("123", String::new, Trigger::Input));
}

#[test]
fn test_and_mode_regex_blocks_length() {
    let auto = AutoEnter::new(AutoEnterConfig {
        logic: CriteriaLogic::And,
        on_raw_length: true,
        raw_length: 4,
        on_regex: true,
        regex: r"/^[0-9]+$/".to_string(),
        ..AutoEnterConfig::default()
    });
    assert!(!auto.should_enter("12a4", String::new, Trigger::Input));
    assert!(auto.should_enter("1234", String::new, Trigger::Input));
}

#[test]
fn test_timeout_criterion_ignores_input_checks() {
    let auto = AutoEnter::new(AutoEnterConfig {
        on_timeout: true,
        ..AutoEnterConfig::default()
    });
    for raw in ["", "1", "123456789"] {
        assert!(!auto.should_enter(raw, || raw.to_string(), Trigger::Input));
    }
}

#[test]
fn test_malformed_regex_never_matches() {
    let pattern = EntryPattern::compile("not-a-regex");
    for text in ["", "not-a-regex", "abc", "/"] {
        assert!(!pattern.is_match(text));
    }
}

#[test]
fn test_regex_with_two_flags_never_enters() {
    let mut entry = DataEntry::new(auto_enter(AutoEnterConfig {
        on_regex: true,
        regex: "/.*/gi".to_string(),
        ..AutoEnterConfig::default()
    }));
    let outcomes = press_all(&mut entry, &["a", "b"], Instant::now());
    assert_eq!(outcomes, vec![Outcome::Changed, Outcome::Changed]);
    assert_eq!(entry.history().counter(), 0);
    assert_eq!(entry.raw(), "ab");
}

// =========================================================================
// Formatter
// =========================================================================

#[test]
fn test_format_named_and_default() {
    assert_eq!(format("<b>", "html"), "&lt;b&gt;");
    assert_eq!(format("<b>", "*"), "<b>");
    assert_eq!(format("<b>", "not a transform"), "<b>");
}

#[test]
fn test_format_precedence() {
    // Substitution wins over printf even with a % in the replacement
    assert_eq!(format("12", "/(\\d+)/$1%/"), "12%");
    assert_eq!(format("12", "Input %s"), "Input 12");
    assert_eq!(format("it's", "shellArg"), "'it'\\''s'");
}

// =========================================================================
// Commit controller
// =========================================================================

#[test]
fn test_history_ordering() {
    let mut entry = DataEntry::default();
    for value in ["A", "B", "C"] {
        entry.process(ControlAction::Set {
            text: value.to_string(),
        });
        entry.enter(None);
    }
    let history = entry.history();
    assert_eq!(history.last(), "C");
    assert_eq!(history.second_last(), "B");
    assert_eq!(history.counter(), 3);
}

#[test]
fn test_counter_increments_for_every_copy_mode() {
    let mut entry = DataEntry::default();
    let modes = [
        Some(CopyMode::Raw),
        Some(CopyMode::Formatted),
        Some(CopyMode::Nothing),
        Some(CopyMode::Unrecognized("bogus".to_string())),
        None,
    ];
    for (i, mode) in modes.into_iter().enumerate() {
        entry.enter(mode);
        assert_eq!(entry.history().counter(), i as u64 + 1);
    }
}

#[test]
fn test_after_entry_modes() {
    let mut config = Config::default();
    config.enter.after = AfterEntry::Keep;
    let mut entry = DataEntry::new(config);
    entry.process(ControlAction::Set {
        text: "77".to_string(),
    });
    entry.enter(None);
    assert_eq!(entry.raw(), "77");

    let mut config = Config::default();
    config.enter.after = AfterEntry::Clear;
    entry.apply_config(config);
    entry.enter(None);
    assert_eq!(entry.raw(), "");
    assert_eq!(entry.history().second_last(), "77");
}

// =========================================================================
// Timer
// =========================================================================

#[test]
fn test_double_restart_single_fire() {
    let start = Instant::now();
    let mut timer = InactivityTimer::new(Duration::from_millis(200));
    timer.restart_at(start);
    timer.restart_at(start + Duration::from_millis(10));

    let fires = (0..100)
        .filter(|i| timer.check_timeout(start + Duration::from_millis(i * 10)))
        .count();
    assert_eq!(fires, 1);
}

#[test]
fn test_entry_timeout_commits_once() {
    let mut entry = DataEntry::new(auto_enter(AutoEnterConfig {
        on_timeout: true,
        timeout: 0.5,
        ..AutoEnterConfig::default()
    }));
    let start = Instant::now();
    press_all(&mut entry, &["4", "2"], start);

    let mut commits = 0;
    for ms in (0..3000).step_by(50) {
        if entry.poll_timeout(start + Duration::from_millis(ms)) {
            commits += 1;
        }
    }
    assert_eq!(commits, 1);
    assert_eq!(entry.history().last(), "42");
}

// =========================================================================
// Modifier latches
// =========================================================================

#[test]
fn test_latches_hold_and_release() {
    let mut latches = ModifierLatches::new();
    latches.press(0, "a").unwrap();
    latches.press(0, "b").unwrap();
    assert!(latches.is_active(0));

    latches.release_control("a");
    assert!(latches.is_active(0));
    latches.release_control("b");
    assert!(!latches.is_active(0));
}

#[test]
fn test_latch_modes_through_entry() {
    let mut entry = DataEntry::default();
    entry.process(ControlAction::Modifier {
        slot: 0,
        mode: LatchMode::Toggle,
    });
    assert!(entry.modifier_active(0));
    entry.process(ControlAction::Modifier {
        slot: 0,
        mode: LatchMode::Release,
    });
    assert!(!entry.modifier_active(0));
    assert_eq!(
        entry.process(ControlAction::Modifier {
            slot: 9,
            mode: LatchMode::Toggle,
        }),
        Outcome::Unchanged
    );
}

// =========================================================================
// Config
// =========================================================================

#[test]
fn test_config_from_toml_drives_entry() {
    let config = Config::from_toml(
        r#"
[entry]
format = "CH %s"

[enter]
copy = "formatted"

[auto_enter]
on_raw_length = true
raw_length = 3

[controls.ok]
action = "enter"
"#,
    )
    .unwrap();

    let mut entry = DataEntry::new(config);
    let now = Instant::now();
    let outcomes = press_all(&mut entry, &["1", "2", "3"], now);
    assert_eq!(
        outcomes,
        vec![Outcome::Changed, Outcome::Changed, Outcome::Entered]
    );
    assert_eq!(entry.history().last(), "CH 123");

    press_all(&mut entry, &["9"], now);
    assert_eq!(entry.on_control_pressed_at("ok", None, now), Outcome::Entered);
    assert_eq!(entry.history().last(), "CH 9");
    assert_eq!(entry.history().second_last(), "CH 123");
}
