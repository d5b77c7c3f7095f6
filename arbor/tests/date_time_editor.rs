//! Tests for the masked date/time editor.

use std::cell::RefCell;
use std::rc::Rc;

use arbor::components::date_time_editor::{
    DatePart, DateRange, DateTimeEditor, DateTimeEditorConfig, DateTimeEditorEventArgs,
    ValidationError,
};
use arbor::components::events::{ComponentEvents, EventResult};
use chrono::{NaiveDate, NaiveDateTime};
use spindle::{Event, Key, KeyCombo};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn dt_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn editor(format: &str) -> DateTimeEditor {
    DateTimeEditor::new(DateTimeEditorConfig::new(format)).with_clock(|| dt(2020, 6, 1))
}

fn press(editor: &mut DateTimeEditor, key: Key) -> EventResult {
    editor.on_key(&KeyCombo::key(key))
}

fn type_text(editor: &mut DateTimeEditor, text: &str) {
    for c in text.chars() {
        press(editor, Key::Char(c));
    }
}

type Log = Rc<RefCell<Vec<DateTimeEditorEventArgs>>>;

fn record_value_changes(editor: &mut DateTimeEditor) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    editor.on_value_change(move |args| sink.borrow_mut().push(args.clone()));
    log
}

fn record_validation_fails(editor: &mut DateTimeEditor) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    editor.on_validation_fail(move |args| sink.borrow_mut().push(args.clone()));
    log
}

// ============================================================================
// Focus and display
// ============================================================================

#[test]
fn test_spin_fields_and_display_on_blur() {
    let mut editor = DateTimeEditor::new(
        DateTimeEditorConfig::new("dd-MM-yy").display_format("dd.MM.y"),
    )
    .with_value(dt(2011, 10, 20));

    editor.handle_event(&Event::Focus);
    assert_eq!(editor.text(), "20-10-11");

    editor.set_cursor(0);
    press(&mut editor, Key::Up);
    assert_eq!(editor.text(), "21-10-11");

    editor.set_cursor(3);
    press(&mut editor, Key::Up);
    assert_eq!(editor.text(), "21-11-11");

    editor.handle_event(&Event::Blur);
    assert_eq!(editor.text(), "21.11.2011");
    assert_eq!(editor.value(), Some(dt(2011, 11, 21)));
}

#[test]
fn test_blurred_text_uses_input_format_without_display_format() {
    let editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    assert_eq!(editor.text(), "15/03/2020");
}

#[test]
fn test_empty_editor_shows_mask_while_focused() {
    let mut editor = editor("dd/MM/yyyy");
    assert_eq!(editor.text(), "__/__/____");
    editor.on_focus();
    assert_eq!(editor.text(), "__/__/____");
    assert_eq!(editor.cursor(), 0);
}

#[test]
fn test_single_letter_format_is_widened() {
    let editor = editor("d/M/yy");
    assert_eq!(editor.input_format(), "dd/MM/yy");
    assert_eq!(editor.empty_mask(), "__/__/__");
}

#[test]
fn test_twelve_hour_rendering() {
    let mut editor = editor("hh:mm tt").with_value(dt_hms(2020, 1, 1, 13, 5, 0));
    editor.on_focus();
    assert_eq!(editor.text(), "01:05 PM");

    editor.set_cursor(6);
    press(&mut editor, Key::Up);
    assert_eq!(editor.text(), "01:05 AM");
    assert_eq!(editor.value(), Some(dt_hms(2020, 1, 1, 1, 5, 0)));
}

#[test]
fn test_mask_length_is_stable_while_editing() {
    let formats = ["dd/MM/yyyy", "d/M/yy", "MM-dd-yyyy HH:mm", "hh:mm:ss tt"];
    let keys = [
        Key::Char('1'),
        Key::Up,
        Key::Char('9'),
        Key::Backspace,
        Key::Right,
        Key::Char('P'),
        Key::Down,
        Key::Delete,
        Key::End,
        Key::Char('3'),
        Key::Home,
        Key::Char('0'),
    ];

    for format in formats {
        let mut editor = editor(format);
        editor.on_focus();
        let width = editor.mask().len();
        assert_eq!(editor.text().chars().count(), width, "{format}");

        for key in keys {
            press(&mut editor, key);
            assert_eq!(editor.text().chars().count(), width, "{format} after {key:?}");
        }
        editor.on_wheel(0, -1);
        assert_eq!(editor.text().chars().count(), width, "{format} after wheel");
    }
}

// ============================================================================
// Spinning
// ============================================================================

#[test]
fn test_day_spin_wraps_without_carry() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 1, 31));
    editor.increment(Some(DatePart::Date));
    assert_eq!(editor.value(), Some(dt(2020, 1, 1)));
}

#[test]
fn test_day_spin_clamps_without_loop() {
    let mut editor = DateTimeEditor::new(DateTimeEditorConfig::new("dd/MM/yyyy").no_spin_loop())
        .with_value(dt(2020, 1, 31));
    editor.increment(Some(DatePart::Date));
    assert_eq!(editor.value(), Some(dt(2020, 1, 31)));

    editor.set_spin_loop(true);
    editor.increment(None);
    assert_eq!(editor.value(), Some(dt(2020, 1, 1)));
}

#[test]
fn test_blurred_spin_defaults_to_day() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 5, 10));
    editor.decrement(None);
    assert_eq!(editor.value(), Some(dt(2020, 5, 9)));
    assert_eq!(editor.text(), "09/05/2020");
}

#[test]
fn test_spin_on_empty_editor_takes_now() {
    let mut editor = editor("dd/MM/yyyy");
    editor.increment(None);
    assert_eq!(editor.value(), Some(dt(2020, 6, 1)));
}

#[test]
fn test_wheel_spins_field_under_caret() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 5, 10));
    assert_eq!(editor.on_wheel(0, -1), EventResult::Ignored);

    editor.on_focus();
    editor.set_cursor(4);
    assert_eq!(editor.on_wheel(0, -1), EventResult::Consumed);
    assert_eq!(editor.value(), Some(dt(2020, 6, 10)));
    editor.on_wheel(0, 1);
    editor.on_wheel(0, 1);
    assert_eq!(editor.value(), Some(dt(2020, 4, 10)));
}

#[test]
fn test_ctrl_semicolon_sets_now() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2001, 1, 1));
    editor.on_focus();
    let result = editor.on_key(&KeyCombo::key(Key::Char(';')).ctrl());
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(editor.value(), Some(dt(2020, 6, 1)));
    assert_eq!(editor.text(), "01/06/2020");
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_keys_ignored_while_blurred() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 5, 10));
    assert_eq!(press(&mut editor, Key::Up), EventResult::Ignored);
    assert_eq!(editor.value(), Some(dt(2020, 5, 10)));
}

#[test]
fn test_alt_keys_ignored() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 5, 10));
    editor.on_focus();
    let result = editor.on_key(&KeyCombo::key(Key::Up).alt());
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(editor.value(), Some(dt(2020, 5, 10)));
}

#[test]
fn test_ctrl_arrows_jump_to_literals() {
    let mut editor = editor("dd-MM-yy").with_value(dt(2011, 10, 20));
    editor.on_focus();

    let right = KeyCombo::key(Key::Right).ctrl();
    let left = KeyCombo::key(Key::Left).ctrl();

    editor.on_key(&right);
    assert_eq!(editor.cursor(), 2);
    editor.on_key(&right);
    assert_eq!(editor.cursor(), 5);
    editor.on_key(&left);
    assert_eq!(editor.cursor(), 3);
    editor.on_key(&left);
    assert_eq!(editor.cursor(), 0);
}

// ============================================================================
// Typing and commit
// ============================================================================

#[test]
fn test_partial_input_never_emits_value_change() {
    let mut editor = editor("dd/MM/yyyy");
    let changes = record_value_changes(&mut editor);
    editor.on_focus();

    type_text(&mut editor, "1503");
    assert_eq!(editor.text(), "15/03/____");
    assert!(changes.borrow().is_empty());
    assert_eq!(editor.value(), None);

    type_text(&mut editor, "2020");
    assert_eq!(editor.text(), "15/03/2020");
    assert_eq!(editor.value(), Some(dt(2020, 3, 15)));

    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].new_value, Some(dt(2020, 3, 15)));
    assert_eq!(changes[0].old_value, None);
}

#[test]
fn test_partial_input_keeps_committed_value() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    let changes = record_value_changes(&mut editor);
    let seen: Rc<RefCell<Vec<Option<NaiveDateTime>>>> = Rc::default();
    let sink = Rc::clone(&seen);
    editor.register_on_change(move |value| sink.borrow_mut().push(value));

    editor.on_focus();
    editor.set_cursor(10);
    press(&mut editor, Key::Backspace);
    assert_eq!(editor.text(), "15/03/202_");
    assert_eq!(editor.value(), Some(dt(2020, 3, 15)));
    assert!(changes.borrow().is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_typed_change_reports_previous_value() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    let changes = record_value_changes(&mut editor);
    editor.on_focus();
    editor.set_selection_range(0, 2);

    type_text(&mut editor, "1");
    assert_eq!(editor.text(), "1_/03/2020");
    assert_eq!(editor.value(), Some(dt(2020, 3, 15)));

    type_text(&mut editor, "6");
    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old_value, Some(dt(2020, 3, 15)));
    assert_eq!(changes[0].new_value, Some(dt(2020, 3, 16)));
    assert_eq!(changes[0].user_input, "16/03/2020");
}

#[test]
fn test_spin_after_partial_input_changes_one_field() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    let changes = record_value_changes(&mut editor);
    editor.on_focus();
    editor.set_cursor(10);
    press(&mut editor, Key::Backspace);

    editor.set_cursor(3);
    press(&mut editor, Key::Up);
    assert_eq!(editor.value(), Some(dt(2020, 4, 15)));
    assert_eq!(editor.text(), "15/04/2020");

    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old_value, Some(dt(2020, 3, 15)));
    assert_eq!(changes[0].new_value, Some(dt(2020, 4, 15)));
}

#[test]
fn test_clearing_every_slot_commits_none() {
    let mut editor = editor("dd/MM").with_value(dt(2020, 3, 15));
    let changes = record_value_changes(&mut editor);
    editor.on_focus();
    editor.on_key(&KeyCombo::key(Key::Char('a')).ctrl());
    press(&mut editor, Key::Delete);

    assert_eq!(editor.text(), "__/__");
    assert_eq!(editor.value(), None);
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn test_letters_rejected_in_digit_slots() {
    let mut editor = editor("dd/MM/yyyy");
    editor.on_focus();
    assert_eq!(press(&mut editor, Key::Char('x')), EventResult::Consumed);
    assert_eq!(editor.text(), "__/__/____");
}

// ============================================================================
// Blur
// ============================================================================

#[test]
fn test_blur_on_empty_mask_clears() {
    let mut editor = editor("dd/MM/yyyy");
    let changes = record_value_changes(&mut editor);
    editor.on_focus();
    editor.on_blur();
    assert_eq!(editor.text(), "");
    assert_eq!(editor.value(), None);
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn test_typed_month_takes_day_from_today() {
    let mut editor = editor("MM/yyyy");
    editor.on_focus();
    type_text(&mut editor, "042021");
    assert_eq!(editor.value(), Some(dt(2021, 4, 1)));

    editor.on_blur();
    assert_eq!(editor.text(), "04/2021");
}

#[test]
fn test_blur_with_partial_text_clears() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    let fails = record_validation_fails(&mut editor);
    editor.on_focus();
    editor.set_selection_range(0, 2);
    type_text(&mut editor, "2");
    assert_eq!(editor.text(), "2_/03/2020");

    editor.on_blur();
    assert_eq!(editor.value(), None);

    let fails = fails.borrow();
    assert_eq!(fails.len(), 1);
    assert_eq!(fails[0].old_value, Some(dt(2020, 3, 15)));
    assert_eq!(fails[0].new_value, None);
    assert_eq!(fails[0].user_input, "2_/03/2020");
}

#[test]
fn test_blur_correction_equal_to_previous_value_is_dropped() {
    let mut editor = editor("dd/MM/yyyy").with_value(dt(2020, 3, 15));
    editor.on_validation_fail(|args| args.new_value = args.old_value);
    editor.on_focus();
    editor.set_selection_range(0, 2);
    type_text(&mut editor, "2");

    editor.on_blur();
    assert_eq!(editor.value(), None);
    assert_eq!(editor.text(), "__/__/____");
}

#[test]
fn test_blur_with_unparsable_text_takes_corrected_value() {
    let mut editor = editor("dd/MM/yyyy");
    let fails: Log = Rc::default();
    let sink = Rc::clone(&fails);
    editor.on_validation_fail(move |args| {
        sink.borrow_mut().push(args.clone());
        args.new_value = Some(dt(2020, 1, 1));
    });

    editor.on_focus();
    type_text(&mut editor, "99999999");
    assert_eq!(editor.text(), "99/99/9999");
    editor.on_blur();

    let fails = fails.borrow();
    assert_eq!(fails.len(), 1);
    assert_eq!(fails[0].user_input, "99/99/9999");
    assert_eq!(fails[0].new_value, None);
    assert_eq!(editor.value(), Some(dt(2020, 1, 1)));
    assert_eq!(editor.text(), "01/01/2020");
}

#[test]
fn test_blur_with_unparsable_text_clears_without_correction() {
    let mut editor = editor("dd/MM/yyyy");
    let fails = record_validation_fails(&mut editor);
    editor.on_focus();
    type_text(&mut editor, "31023000");
    editor.on_blur();

    assert_eq!(fails.borrow().len(), 1);
    assert_eq!(editor.value(), None);
    assert_eq!(editor.text(), "__/__/____");
}

#[test]
fn test_touched_fires_on_focus_and_blur() {
    let mut editor = editor("dd/MM/yyyy");
    let touched = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&touched);
    editor.register_on_touched(move || *sink.borrow_mut() += 1);

    editor.on_focus();
    assert_eq!(editor.on_focus(), EventResult::Ignored);
    editor.on_blur();
    assert_eq!(editor.on_blur(), EventResult::Ignored);
    assert_eq!(*touched.borrow(), 2);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_out_of_range_value_reported_but_applied() {
    let mut editor = DateTimeEditor::new(
        DateTimeEditorConfig::new("dd/MM/yyyy")
            .min_value(dt(2020, 1, 1))
            .max_value(dt(2020, 1, 11)),
    );
    let fails = record_validation_fails(&mut editor);

    editor.update_value(Some(dt(2020, 1, 16)));

    let fails = fails.borrow();
    assert_eq!(fails.len(), 1);
    assert_eq!(fails[0].new_value, Some(dt(2020, 1, 16)));
    assert_eq!(editor.value(), Some(dt(2020, 1, 16)));
    assert_eq!(
        editor.validate(),
        Err(ValidationError::MaxValue {
            value: dt(2020, 1, 16),
            max: dt(2020, 1, 11),
        })
    );
}

#[test]
fn test_value_in_range() {
    let mut editor = editor("dd/MM/yyyy");
    assert!(!editor.value_in_range(None));
    assert!(editor.value_in_range(Some(dt(1900, 1, 1))));

    editor.set_min_value(Some(dt(2020, 1, 1)));
    assert!(editor.value_in_range(Some(dt(2030, 1, 1))));
    assert!(!editor.value_in_range(Some(dt(2019, 12, 31))));

    editor.set_max_value(Some(dt(2020, 12, 31)));
    assert!(editor.value_in_range(Some(dt(2020, 12, 31))));
    assert!(!editor.value_in_range(Some(dt(2021, 1, 1))));
}

#[test]
fn test_validate_empty_value_passes() {
    let editor = DateTimeEditor::new(DateTimeEditorConfig::new("dd/MM/yyyy").min_value(dt(2020, 1, 1)));
    assert_eq!(editor.validate(), Ok(()));
}

#[test]
fn test_bound_changes_notify_validator() {
    let mut editor = editor("dd/MM/yyyy");
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    editor.register_on_validator_change(move || *sink.borrow_mut() += 1);

    editor.set_min_value(Some(dt(2020, 1, 1)));
    editor.set_max_value(None);
    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn test_disabled_date_reported_but_applied() {
    let mut editor = DateTimeEditor::new(
        DateTimeEditorConfig::new("dd/MM/yyyy").disabled_dates(vec![DateRange::Weekends]),
    );
    let disabled = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&disabled);
    editor.on_disabled_date(move |args| sink.borrow_mut().push(args.value));

    editor.update_value(Some(dt(2024, 6, 14)));
    assert!(disabled.borrow().is_empty());

    editor.update_value(Some(dt(2024, 6, 15)));
    assert_eq!(*disabled.borrow(), vec![dt(2024, 6, 15)]);
    assert_eq!(editor.value(), Some(dt(2024, 6, 15)));
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_setters_do_not_emit() {
    let mut editor = editor("dd/MM/yyyy");
    let changes = record_value_changes(&mut editor);
    editor.set_value(Some(dt(2020, 3, 15)));
    editor.write_value(None);
    assert!(changes.borrow().is_empty());
    assert_eq!(editor.text(), "__/__/____");
}

#[test]
fn test_locale_changes_display() {
    let mut editor = DateTimeEditor::new(
        DateTimeEditorConfig::new("dd/MM/yyyy").display_format("dd MMMM yyyy"),
    )
    .with_value(dt(2020, 3, 15));
    assert_eq!(editor.text(), "15 March 2020");

    editor.set_locale("de-DE");
    assert_eq!(editor.text(), "15 März 2020");
}
