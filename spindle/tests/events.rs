use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
};
use spindle::{Event, Key, KeyCombo, Modifiers};

// ============================================================================
// Key conversion
// ============================================================================

#[test]
fn test_key_code_conversion() {
    assert_eq!(Key::from(KeyCode::Up), Key::Up);
    assert_eq!(Key::from(KeyCode::Char(';')), Key::Char(';'));
    assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
}

#[test]
fn test_modifier_conversion() {
    let mods = Modifiers::from(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    assert!(mods.ctrl);
    assert!(mods.shift);
    assert!(!mods.alt);
    assert!(Modifiers::from(KeyModifiers::NONE).none());
}

#[test]
fn test_key_event_to_combo() {
    let combo: KeyCombo = KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL).into();
    assert_eq!(combo, KeyCombo::key(Key::Left).ctrl());
}

// ============================================================================
// Event conversion
// ============================================================================

#[test]
fn test_scroll_maps_to_wheel_delta() {
    let up = CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollUp,
        column: 3,
        row: 1,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(
        Event::from_crossterm(&up),
        Some(Event::Wheel {
            delta_x: 0,
            delta_y: -1
        })
    );

    let down = CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 3,
        row: 1,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(
        Event::from_crossterm(&down),
        Some(Event::Wheel {
            delta_x: 0,
            delta_y: 1
        })
    );
}

#[test]
fn test_focus_events() {
    assert_eq!(Event::from_crossterm(&CtEvent::FocusGained), Some(Event::Focus));
    assert_eq!(Event::from_crossterm(&CtEvent::FocusLost), Some(Event::Blur));
    assert_eq!(Event::from_crossterm(&CtEvent::Resize(80, 24)), None);
}
