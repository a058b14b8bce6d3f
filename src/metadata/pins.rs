use serde::{Deserialize, Serialize};

/// A microcontroller port pin declared in a pin mapping file.
///
/// The `direction` key selects between input and output pin settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "direction", rename_all = "camelCase")]
pub enum PortPinInfo {
    Input(InputPinInfo),
    Output(OutputPinInfo),
}

impl PortPinInfo {
    pub fn port(&self) -> &str {
        match self {
            PortPinInfo::Input(pin) => &pin.port,
            PortPinInfo::Output(pin) => &pin.port,
        }
    }

    pub fn pin_number(&self) -> u8 {
        match self {
            PortPinInfo::Input(pin) => pin.pin_number,
            PortPinInfo::Output(pin) => pin.pin_number,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            PortPinInfo::Input(pin) => pin.description.as_deref(),
            PortPinInfo::Output(pin) => pin.description.as_deref(),
        }
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, PortPinInfo::Input(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPinInfo {
    pub port: String,
    pub pin_number: u8,
    pub pin_mode: InputPinMode,
    pub trigger_mode: TriggerMode,
    pub interrupt_priority: InterruptPriority,
    pub interrupt_number: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPinInfo {
    pub port: String,
    pub pin_number: u8,
    pub allow_read: bool,
    pub pin_mode: OutputPinMode,
    pub initial_state: InitialState,
    pub invert: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputPinMode {
    Pullup,
    Pulldown,
    Tristate,
    Busholder,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerMode {
    None,
    Rising,
    Falling,
    Toggle,
    Low,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterruptPriority {
    Off,
    Low,
    Medium,
    High,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputPinMode {
    WiredOr,
    WiredAnd,
    WiredOrPull,
    WiredAndPull,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InitialState {
    Low,
    High,
}

#[cfg(test)]
mod tests {
    use super::{
        InitialState, InputPinInfo, InputPinMode, InterruptPriority, OutputPinMode, PortPinInfo,
        TriggerMode,
    };

    #[test]
    fn input_pin_deserialize() {
        let pin: PortPinInfo = serde_yml::from_str(
            r#"
            port: PORTF
            pinNumber: 0
            direction: input
            pinMode: pullup
            triggerMode: toggle
            interruptPriority: low
            interruptNumber: 1
            "#,
        )
        .unwrap();

        assert_eq!(
            pin,
            PortPinInfo::Input(InputPinInfo {
                port: "PORTF".into(),
                pin_number: 0,
                pin_mode: InputPinMode::Pullup,
                trigger_mode: TriggerMode::Toggle,
                interrupt_priority: InterruptPriority::Low,
                interrupt_number: 1,
                description: None,
            })
        );
        assert!(pin.is_input());
    }

    #[test]
    fn output_pin_deserialize() {
        let pin: PortPinInfo = serde_yml::from_str(
            r#"
            port: PORTA
            pinNumber: 5
            direction: output
            allowRead: true
            pinMode: wiredAndPull
            initialState: high
            invert: false
            description: Camera trigger
            "#,
        )
        .unwrap();

        let PortPinInfo::Output(output) = &pin else {
            panic!("expected an output pin, found {pin:?}");
        };

        assert_eq!(pin.port(), "PORTA");
        assert_eq!(pin.pin_number(), 5);
        assert_eq!(pin.description(), Some("Camera trigger"));
        assert!(output.allow_read);
        assert!(!output.invert);
        assert_eq!(output.pin_mode, OutputPinMode::WiredAndPull);
        assert_eq!(output.initial_state, InitialState::High);
    }

    #[test]
    fn pin_without_direction() {
        let parsed = serde_yml::from_str::<PortPinInfo>(
            r#"
            port: PORTA
            pinNumber: 5
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn pin_unknown_direction() {
        let parsed = serde_yml::from_str::<PortPinInfo>(
            r#"
            port: PORTA
            pinNumber: 5
            direction: bidirectional
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn output_pin_with_input_settings() {
        let parsed = serde_yml::from_str::<PortPinInfo>(
            r#"
            port: PORTA
            pinNumber: 5
            direction: output
            pinMode: pullup
            triggerMode: toggle
            interruptPriority: low
            interruptNumber: 1
            "#,
        );
        assert!(parsed.is_err());
    }
}
