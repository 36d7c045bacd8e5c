//! Metadata for known capability identifiers.
//!
//! The registry is a side table used for diagnostics and for deciding which
//! capabilities can be presented to application logic. Raw decoding never
//! consults it; an id with no metadata here is still decoded and preserved,
//! which is what makes additive minor protocol versions safe to consume.

use crate::capability::Capability;

/// Broad grouping of a capability, based on the kind of value it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityCategory {
    Button,
    Trigger,
    Axis,
    Motion,
    Touch,
    Mouse,
}

/// Human-readable metadata for a known [Capability].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityMetadata {
    pub name: &'static str,
    pub category: CapabilityCategory,
}

const fn metadata(name: &'static str, category: CapabilityCategory) -> CapabilityMetadata {
    CapabilityMetadata { name, category }
}

/// Look up metadata for the given capability. Returns `None` for ids this
/// implementation does not know about; that is not an error.
pub fn describe(capability: Capability) -> Option<CapabilityMetadata> {
    use CapabilityCategory::*;

    let metadata = match capability {
        Capability::MOUSE_BUTTON_LEFT => metadata("MouseButtonLeft", Mouse),
        Capability::MOUSE_BUTTON_RIGHT => metadata("MouseButtonRight", Mouse),
        Capability::MOUSE_BUTTON_MIDDLE => metadata("MouseButtonMiddle", Mouse),
        Capability::MOUSE_BUTTON_SIDE => metadata("MouseButtonSide", Mouse),
        Capability::MOUSE_BUTTON_EXTRA => metadata("MouseButtonExtra", Mouse),
        Capability::GAMEPAD_BUTTON_QUICK => metadata("GamepadButtonQuick", Button),
        Capability::GAMEPAD_BUTTON_QUICK2 => metadata("GamepadButtonQuick2", Button),
        Capability::GAMEPAD_BUTTON_SOUTH => metadata("GamepadButtonSouth", Button),
        Capability::GAMEPAD_BUTTON_EAST => metadata("GamepadButtonEast", Button),
        Capability::GAMEPAD_BUTTON_NORTH => metadata("GamepadButtonNorth", Button),
        Capability::GAMEPAD_BUTTON_WEST => metadata("GamepadButtonWest", Button),
        Capability::GAMEPAD_BUTTON_LEFT_BUMPER => metadata("GamepadButtonLeftBumper", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_BUMPER => metadata("GamepadButtonRightBumper", Button),
        Capability::GAMEPAD_BUTTON_LEFT_TRIGGER => metadata("GamepadButtonLeftTrigger", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_TRIGGER => metadata("GamepadButtonRightTrigger", Button),
        Capability::GAMEPAD_BUTTON_SELECT => metadata("GamepadButtonSelect", Button),
        Capability::GAMEPAD_BUTTON_START => metadata("GamepadButtonStart", Button),
        Capability::GAMEPAD_BUTTON_GUIDE => metadata("GamepadButtonGuide", Button),
        Capability::GAMEPAD_BUTTON_LEFT_STICK => metadata("GamepadButtonLeftStick", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_STICK => metadata("GamepadButtonRightStick", Button),
        Capability::GAMEPAD_BUTTON_DPAD_UP => metadata("GamepadButtonDpadUp", Button),
        Capability::GAMEPAD_BUTTON_DPAD_DOWN => metadata("GamepadButtonDpadDown", Button),
        Capability::GAMEPAD_BUTTON_DPAD_LEFT => metadata("GamepadButtonDpadLeft", Button),
        Capability::GAMEPAD_BUTTON_DPAD_RIGHT => metadata("GamepadButtonDpadRight", Button),
        Capability::GAMEPAD_BUTTON_KEYBOARD => metadata("GamepadButtonKeyboard", Button),
        Capability::GAMEPAD_BUTTON_SCREENSHOT => metadata("GamepadButtonScreenshot", Button),
        Capability::GAMEPAD_BUTTON_MUTE => metadata("GamepadButtonMute", Button),
        Capability::GAMEPAD_BUTTON_LEFT_PADDLE1 => metadata("GamepadButtonLeftPaddle1", Button),
        Capability::GAMEPAD_BUTTON_LEFT_PADDLE2 => metadata("GamepadButtonLeftPaddle2", Button),
        Capability::GAMEPAD_BUTTON_LEFT_PADDLE3 => metadata("GamepadButtonLeftPaddle3", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_PADDLE1 => metadata("GamepadButtonRightPaddle1", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_PADDLE2 => metadata("GamepadButtonRightPaddle2", Button),
        Capability::GAMEPAD_BUTTON_RIGHT_PADDLE3 => metadata("GamepadButtonRightPaddle3", Button),
        Capability::GAMEPAD_BUTTON_LEFT_STICK_TOUCH => {
            metadata("GamepadButtonLeftStickTouch", Button)
        }
        Capability::GAMEPAD_BUTTON_RIGHT_STICK_TOUCH => {
            metadata("GamepadButtonRightStickTouch", Button)
        }
        Capability::GAMEPAD_AXIS_LEFT_STICK => metadata("GamepadAxisLeftStick", Axis),
        Capability::GAMEPAD_AXIS_RIGHT_STICK => metadata("GamepadAxisRightStick", Axis),
        Capability::GAMEPAD_TRIGGER_LEFT => metadata("GamepadTriggerLeft", Trigger),
        Capability::GAMEPAD_TRIGGER_RIGHT => metadata("GamepadTriggerRight", Trigger),
        Capability::GAMEPAD_TRIGGER_LEFT_TOUCHPAD_FORCE => {
            metadata("GamepadTriggerLeftTouchpadForce", Trigger)
        }
        Capability::GAMEPAD_TRIGGER_LEFT_STICK_FORCE => {
            metadata("GamepadTriggerLeftStickForce", Trigger)
        }
        Capability::GAMEPAD_TRIGGER_RIGHT_TOUCHPAD_FORCE => {
            metadata("GamepadTriggerRightTouchpadForce", Trigger)
        }
        Capability::GAMEPAD_TRIGGER_RIGHT_STICK_FORCE => {
            metadata("GamepadTriggerRightStickForce", Trigger)
        }
        Capability::GAMEPAD_GYRO_CENTER => metadata("GamepadGyroCenter", Motion),
        Capability::GAMEPAD_GYRO_LEFT => metadata("GamepadGyroLeft", Motion),
        Capability::GAMEPAD_GYRO_RIGHT => metadata("GamepadGyroRight", Motion),
        Capability::GAMEPAD_ACCELEROMETER_CENTER => metadata("GamepadAccelerometerCenter", Motion),
        Capability::GAMEPAD_ACCELEROMETER_LEFT => metadata("GamepadAccelerometerLeft", Motion),
        Capability::GAMEPAD_ACCELEROMETER_RIGHT => metadata("GamepadAccelerometerRight", Motion),
        Capability::TOUCHPAD_LEFT_MOTION => metadata("TouchpadLeftMotion", Touch),
        Capability::TOUCHPAD_CENTER_MOTION => metadata("TouchpadCenterMotion", Touch),
        Capability::TOUCHPAD_RIGHT_MOTION => metadata("TouchpadRightMotion", Touch),
        Capability::TOUCHPAD_LEFT_BUTTON => metadata("TouchpadLeftButton", Touch),
        Capability::TOUCHPAD_CENTER_BUTTON => metadata("TouchpadCenterButton", Touch),
        Capability::TOUCHPAD_RIGHT_BUTTON => metadata("TouchpadRightButton", Touch),
        _ => return None,
    };

    Some(metadata)
}
