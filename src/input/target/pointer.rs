use std::error::Error;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisCode, AttributeSet, BusType, EventType, InputEvent, InputId, KeyCode,
    PropType, SynchronizationCode, SynchronizationEvent, UinputAbsSetup,
};
use tokio::sync::mpsc;

use crate::drivers::onetouch::{
    calibration::TargetArea,
    event::{Action, Diagnostic},
};

/// Configuration of the target pointer device.
#[derive(Debug, Clone)]
pub struct PointerConfig {
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
    pub target: TargetArea,
    /// Log actions instead of creating a uinput device
    pub dry_run: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            name: "OneTouch Pointer".to_string(),
            vendor_id: 0x0000,
            product_id: 0xffff,
            version: 0x001,
            target: TargetArea::default(),
            dry_run: false,
        }
    }
}

/// Absolute pointer device that injects the [Action]s produced by the
/// touchscreen driver.
#[derive(Debug)]
pub struct PointerDevice {
    config: PointerConfig,
    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,
}

impl PointerDevice {
    pub fn new(config: PointerConfig) -> Self {
        let (tx, rx) = mpsc::channel(1024);
        Self { config, tx, rx }
    }

    /// Returns a transmitter channel that can be used to send actions to this device
    pub fn transmitter(&self) -> mpsc::Sender<Action> {
        self.tx.clone()
    }

    /// Creates and runs the target device until every transmitter is dropped
    pub async fn run(mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Only the external transmitters should keep the channel open
        drop(self.tx);

        let mut device = match self.config.dry_run {
            true => None,
            false => {
                log::debug!("Creating virtual pointer");
                Some(Self::create_virtual_device(&self.config)?)
            }
        };

        log::debug!("Started listening for actions to send");
        while let Some(action) = self.rx.recv().await {
            if let Action::Diagnostic(diagnostic) = &action {
                log_diagnostic(diagnostic);
                continue;
            }
            let Some(device) = device.as_mut() else {
                log::info!("Pointer action: {action:?}");
                continue;
            };
            let mut events = translate_action(&action);
            events.push(SynchronizationEvent::new(SynchronizationCode::SYN_REPORT, 0).into());
            device.emit(events.as_slice())?;
        }

        log::debug!("Pointer action channel closed");
        Ok(())
    }

    /// Create the virtual device to emulate
    fn create_virtual_device(
        config: &PointerConfig,
    ) -> Result<VirtualDevice, Box<dyn Error + Send + Sync>> {
        // Setup Key inputs
        let mut keys = AttributeSet::<KeyCode>::new();
        keys.insert(KeyCode::BTN_LEFT);
        keys.insert(KeyCode::BTN_TOUCH);

        // Setup ABS inputs. Panel X is scaled into the target height.
        let x_max = config.target.height.saturating_sub(1) as i32;
        let y_max = config.target.width.saturating_sub(1) as i32;
        let x_setup = AbsInfo::new(0, 0, x_max, 0, 0, 1);
        let y_setup = AbsInfo::new(0, 0, y_max, 0, 0, 1);
        let abs_x = UinputAbsSetup::new(AbsoluteAxisCode::ABS_X, x_setup);
        let abs_y = UinputAbsSetup::new(AbsoluteAxisCode::ABS_Y, y_setup);

        // Setup properties
        let mut properties = AttributeSet::<PropType>::new();
        properties.insert(PropType::DIRECT);

        // Identify to the kernel as a serial (BUS_RS232) touchscreen
        let id = InputId::new(
            BusType(0x13),
            config.vendor_id,
            config.product_id,
            config.version,
        );

        let device = VirtualDeviceBuilder::new()?
            .name(config.name.as_str())
            .input_id(id)
            .with_properties(&properties)?
            .with_keys(&keys)?
            .with_absolute_axis(&abs_x)?
            .with_absolute_axis(&abs_y)?
            .build()?;

        Ok(device)
    }
}

/// Translate the given action into evdev events. Diagnostics produce no events.
pub fn translate_action(action: &Action) -> Vec<InputEvent> {
    match action {
        Action::MoveTo { x, y } => vec![
            InputEvent::new(EventType::ABSOLUTE.0, AbsoluteAxisCode::ABS_X.0, *x),
            InputEvent::new(EventType::ABSOLUTE.0, AbsoluteAxisCode::ABS_Y.0, *y),
        ],
        Action::ButtonDown => vec![
            InputEvent::new(EventType::KEY.0, KeyCode::BTN_TOUCH.0, 1),
            InputEvent::new(EventType::KEY.0, KeyCode::BTN_LEFT.0, 1),
        ],
        Action::ButtonUp => vec![
            InputEvent::new(EventType::KEY.0, KeyCode::BTN_TOUCH.0, 0),
            InputEvent::new(EventType::KEY.0, KeyCode::BTN_LEFT.0, 0),
        ],
        Action::Diagnostic(_) => Vec::new(),
    }
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic {
        Diagnostic::FlagBits { x_flags, y_flags } => {
            log::info!("flags: {x_flags:x} {y_flags:x}");
        }
        Diagnostic::SessionEnded {
            samples,
            duration,
            sample_rate,
        } => {
            log::info!(
                "released {duration:.3}s later ({samples} reports, {sample_rate:.3} reports/s)"
            );
        }
    }
}
