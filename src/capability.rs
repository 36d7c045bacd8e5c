//! Capability identifiers.
//!
//! A capability names a single input function or physical location on a
//! device, like a specific button or stick axis. Identifiers are a flat
//! 16-bit space; ids this implementation does not recognize are still carried
//! through decoding untouched so that capability reports from newer minor
//! protocol versions keep working.

use std::fmt::Display;

use crate::registry;

/// A 16-bit capability identifier.
///
/// The id is opaque at the wire level; human-readable metadata for known ids
/// lives in [crate::registry].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Capability(u16);

impl Capability {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u16 {
        self.0
    }

    pub const MOUSE_BUTTON_LEFT: Capability = Capability(0x110);
    pub const MOUSE_BUTTON_RIGHT: Capability = Capability(0x111);
    pub const MOUSE_BUTTON_MIDDLE: Capability = Capability(0x112);
    pub const MOUSE_BUTTON_SIDE: Capability = Capability(0x113);
    pub const MOUSE_BUTTON_EXTRA: Capability = Capability(0x114);

    /// Base button, usually on the bottom right, Steam Quick Access Button (...)
    pub const GAMEPAD_BUTTON_QUICK: Capability = Capability(0x126);
    pub const GAMEPAD_BUTTON_QUICK2: Capability = Capability(0x127);

    /// South action, Sony Cross x, Xbox A, Nintendo B
    pub const GAMEPAD_BUTTON_SOUTH: Capability = Capability(0x130);
    /// East action, Sony Circle ◯, Xbox B, Nintendo A
    pub const GAMEPAD_BUTTON_EAST: Capability = Capability(0x131);
    /// North action, Sony Square □, Xbox X, Nintendo Y
    pub const GAMEPAD_BUTTON_NORTH: Capability = Capability(0x133);
    /// West action, Sony Triangle ∆, XBox Y, Nintendo X
    pub const GAMEPAD_BUTTON_WEST: Capability = Capability(0x134);
    /// Left shoulder button, Xbox LB, Sony L1
    pub const GAMEPAD_BUTTON_LEFT_BUMPER: Capability = Capability(0x136);
    /// Right shoulder button, Xbox RB, Sony R1
    pub const GAMEPAD_BUTTON_RIGHT_BUMPER: Capability = Capability(0x137);
    pub const GAMEPAD_BUTTON_LEFT_TRIGGER: Capability = Capability(0x138);
    pub const GAMEPAD_BUTTON_RIGHT_TRIGGER: Capability = Capability(0x139);
    /// Select, Sony Select, Xbox Back, Nintendo -, Steam Deck ⧉
    pub const GAMEPAD_BUTTON_SELECT: Capability = Capability(0x13a);
    /// Start, Xbox Menu, Nintendo +, Steam Deck Hamburger Menu (☰)
    pub const GAMEPAD_BUTTON_START: Capability = Capability(0x13b);
    /// Guide button, Sony PS, Xbox Home, Steam Button
    pub const GAMEPAD_BUTTON_GUIDE: Capability = Capability(0x13c);
    /// Z-axis button on the left stick, Sony L3, Xbox LS
    pub const GAMEPAD_BUTTON_LEFT_STICK: Capability = Capability(0x13d);
    /// Z-axis button on the right stick, Sony R3, Xbox RS
    pub const GAMEPAD_BUTTON_RIGHT_STICK: Capability = Capability(0x13e);

    /// Directional pad up
    pub const GAMEPAD_BUTTON_DPAD_UP: Capability = Capability(0x220);
    /// Directional pad down
    pub const GAMEPAD_BUTTON_DPAD_DOWN: Capability = Capability(0x221);
    /// Directional pad left
    pub const GAMEPAD_BUTTON_DPAD_LEFT: Capability = Capability(0x222);
    /// Directional pad right
    pub const GAMEPAD_BUTTON_DPAD_RIGHT: Capability = Capability(0x223);

    /// Dedicated button to open an on-screen keyboard
    pub const GAMEPAD_BUTTON_KEYBOARD: Capability = Capability(0x304);
    /// Dedicated button to take screenshots
    pub const GAMEPAD_BUTTON_SCREENSHOT: Capability = Capability(0x305);
    /// Dedicated mute button, Sony DualSense Mute
    pub const GAMEPAD_BUTTON_MUTE: Capability = Capability(0x306);
    /// Left back paddle button, Xbox P3, Steam Deck L4
    pub const GAMEPAD_BUTTON_LEFT_PADDLE1: Capability = Capability(0x307);
    /// Left back paddle button, Xbox P4, Steam Deck L5
    pub const GAMEPAD_BUTTON_LEFT_PADDLE2: Capability = Capability(0x308);
    pub const GAMEPAD_BUTTON_LEFT_PADDLE3: Capability = Capability(0x309);
    /// Right back paddle button, Xbox P1, Steam Deck R4
    pub const GAMEPAD_BUTTON_RIGHT_PADDLE1: Capability = Capability(0x30a);
    /// Right back paddle button, Xbox P2, Steam Deck R5
    pub const GAMEPAD_BUTTON_RIGHT_PADDLE2: Capability = Capability(0x30b);
    /// Right "side" paddle button, Legion Go M2
    pub const GAMEPAD_BUTTON_RIGHT_PADDLE3: Capability = Capability(0x30c);
    /// Touch binary sensor for left stick
    pub const GAMEPAD_BUTTON_LEFT_STICK_TOUCH: Capability = Capability(0x30d);
    /// Touch binary sensor for right stick
    pub const GAMEPAD_BUTTON_RIGHT_STICK_TOUCH: Capability = Capability(0x30e);

    /// Left analog stick
    pub const GAMEPAD_AXIS_LEFT_STICK: Capability = Capability(0x400);
    /// Right analog stick
    pub const GAMEPAD_AXIS_RIGHT_STICK: Capability = Capability(0x401);

    /// Left trigger, Xbox Left Trigger, Sony L2, Nintendo ZL
    pub const GAMEPAD_TRIGGER_LEFT: Capability = Capability(0x500);
    /// Right trigger, Xbox Right Trigger, Sony R2, Nintendo ZR
    pub const GAMEPAD_TRIGGER_RIGHT: Capability = Capability(0x501);
    /// Left touchpad force sensor, Steam Deck left touchpad force
    pub const GAMEPAD_TRIGGER_LEFT_TOUCHPAD_FORCE: Capability = Capability(0x502);
    /// Left analog stick force sensor, Steam Deck left stick force
    pub const GAMEPAD_TRIGGER_LEFT_STICK_FORCE: Capability = Capability(0x503);
    /// Right touchpad force sensor, Steam Deck right touchpad force
    pub const GAMEPAD_TRIGGER_RIGHT_TOUCHPAD_FORCE: Capability = Capability(0x504);
    /// Right analog stick force sensor, Steam Deck right stick force
    pub const GAMEPAD_TRIGGER_RIGHT_STICK_FORCE: Capability = Capability(0x505);

    /// Center or main gyro sensor
    pub const GAMEPAD_GYRO_CENTER: Capability = Capability(0x600);
    /// Left side gamepad gyro
    pub const GAMEPAD_GYRO_LEFT: Capability = Capability(0x601);
    /// Right side gamepad gyro
    pub const GAMEPAD_GYRO_RIGHT: Capability = Capability(0x602);
    pub const GAMEPAD_ACCELEROMETER_CENTER: Capability = Capability(0x603);
    pub const GAMEPAD_ACCELEROMETER_LEFT: Capability = Capability(0x604);
    pub const GAMEPAD_ACCELEROMETER_RIGHT: Capability = Capability(0x605);

    /// Left touchpad touch motion
    pub const TOUCHPAD_LEFT_MOTION: Capability = Capability(0x700);
    /// Center touchpad touch motion, DualSense Touchpad motion
    pub const TOUCHPAD_CENTER_MOTION: Capability = Capability(0x701);
    /// Right touchpad touch motion
    pub const TOUCHPAD_RIGHT_MOTION: Capability = Capability(0x702);
    /// Left touchpad button press
    pub const TOUCHPAD_LEFT_BUTTON: Capability = Capability(0x703);
    /// Center touchpad button press, DualSense Touchpad button press
    pub const TOUCHPAD_CENTER_BUTTON: Capability = Capability(0x704);
    /// Right touchpad button press
    pub const TOUCHPAD_RIGHT_BUTTON: Capability = Capability(0x705);
}

impl From<u16> for Capability {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<Capability> for u16 {
    fn from(capability: Capability) -> Self {
        capability.0
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match registry::describe(*self) {
            Some(metadata) => write!(f, "{}", metadata.name),
            None => write!(f, "Capability({:#06x})", self.0),
        }
    }
}
