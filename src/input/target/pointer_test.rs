use evdev::{AbsoluteAxisCode, EventType, KeyCode};

use crate::{
    drivers::onetouch::event::{Action, Diagnostic},
    input::target::pointer::translate_action,
};

#[test]
fn test_translate_move() {
    let events = translate_action(&Action::MoveTo { x: 640, y: 512 });
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type(), EventType::ABSOLUTE);
    assert_eq!(events[0].code(), AbsoluteAxisCode::ABS_X.0);
    assert_eq!(events[0].value(), 640);
    assert_eq!(events[1].event_type(), EventType::ABSOLUTE);
    assert_eq!(events[1].code(), AbsoluteAxisCode::ABS_Y.0);
    assert_eq!(events[1].value(), 512);
}

#[test]
fn test_translate_buttons() {
    let down = translate_action(&Action::ButtonDown);
    let up = translate_action(&Action::ButtonUp);
    for (events, value) in [(down, 1), (up, 0)] {
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_type() == EventType::KEY));
        assert!(events.iter().all(|e| e.value() == value));
        assert!(events.iter().any(|e| e.code() == KeyCode::BTN_LEFT.0));
        assert!(events.iter().any(|e| e.code() == KeyCode::BTN_TOUCH.0));
    }
}

#[test]
fn test_diagnostics_emit_nothing() {
    let action = Action::Diagnostic(Diagnostic::FlagBits {
        x_flags: 1,
        y_flags: 0,
    });
    assert!(translate_action(&action).is_empty());
}

#[tokio::test]
async fn test_dry_run_drains_channel() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use crate::input::target::pointer::{PointerConfig, PointerDevice};

    let config = PointerConfig {
        dry_run: true,
        ..Default::default()
    };
    let device = PointerDevice::new(config);
    let tx = device.transmitter();
    tx.send(Action::MoveTo { x: 1, y: 2 }).await?;
    tx.send(Action::ButtonDown).await?;
    tx.send(Action::ButtonUp).await?;
    drop(tx);

    // Returns once the last transmitter is gone
    device.run().await?;

    Ok(())
}
