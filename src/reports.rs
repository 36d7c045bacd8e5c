use packed_struct::prelude::*;
use thiserror::Error;

use crate::value;

pub mod input_capability_report;
#[cfg(test)]
pub mod input_capability_report_test;
pub mod input_data_report;
#[cfg(test)]
pub mod input_data_report_test;

/// Major version of the Unified Controller Input Specification that this
/// implementation supports. Different major versions signal breaking layout
/// changes and are mutually incompatible.
pub const UNIFIED_SPEC_VERSION_MAJOR: u8 = 1;
/// Minor version of the Unified Controller Input Specification that this
/// implementation supports. Minor versions only add capabilities and are
/// backwards compatible.
pub const UNIFIED_SPEC_VERSION_MINOR: u8 = 0;

/// Report descriptor to advertise
pub const REPORT_DESCRIPTOR: [u8; 24] = [
    // report descriptor for general input/output
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x01, // Usage (0x01)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x02, //   Usage (0x02)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0xFF, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x40, //   Report Count (64)
    0x81, 0x02, //   Input (Data,Var,Abs,No Wrap,Linear,Preferred State,No Null Position)
    0x09, 0x03, //   Usage (0x03)
    0x91,
    0x02, //   Output (Data,Var,Abs,No Wrap,Linear,Preferred State,No Null Position,Non-volatile)
    0xC0, // End Collection
];

/// ReportType contains an enumeration of all possible report types
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Debug)]
pub enum ReportType {
    Unknown = 0x00,
    InputCapabilityReport = 0x01,
    InputDataReport = 0x02,
    /// Reserved; output capabilities are not defined by the specification.
    OutputCapabilityReport = 0x03,
    /// Reserved; output capabilities are not defined by the specification.
    OutputDataReport = 0x04,
}

impl From<u8> for ReportType {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::InputCapabilityReport,
            0x02 => Self::InputDataReport,
            0x03 => Self::OutputCapabilityReport,
            0x04 => Self::OutputDataReport,
            _ => Self::Unknown,
        }
    }
}

/// Feature report types
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Debug)]
pub enum FeatureReportType {
    /// Instruct the device to return a feature report with the available
    /// input capabilities
    GetInputCapabilities = 0x01,
    GetOutputCapabilities = 0x02,
    GetName = 0x03,
    GetVendorId = 0x04,
    GetProductId = 0x05,
    GetSerial = 0x06,
    /// Instruct the device to switch into unified input mode
    SetUnifiedMode = 0x80,
}

/// Error for value type tags outside the defined set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown value type tag `{0:#04x}`")]
pub struct UnknownValueType(pub u8);

/// Describes how to decode a particular value in the input data report.
///
/// Each tag has a fixed width; the width is never negotiated and every tag
/// value is distinct.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default, Ord, PartialOrd)]
pub enum ValueType {
    /// Binary values take up 1 bit in the input report
    #[default]
    Binary = 0x00,
    /// UInt8 values take up 1 byte in the input report
    UInt8 = 0x01,
    /// UInt16 values take up 2 bytes in the input report
    UInt16 = 0x02,
    /// Vector2 values take up 4 bytes in the input report as two signed
    /// 16-bit components
    Vector2 = 0x03,
    /// Vector3 values take up 6 bytes in the input report as three signed
    /// 16-bit components
    Vector3 = 0x04,
    /// Touch values take up 6 bytes in the input report
    Touch = 0x05,
}

impl ValueType {
    /// Parse a wire tag, failing for tags outside the defined set.
    pub fn from_tag(tag: u8) -> Result<Self, UnknownValueType> {
        Self::from_primitive(tag).ok_or(UnknownValueType(tag))
    }

    /// The wire tag for this value type.
    pub fn tag(&self) -> u8 {
        self.to_primitive()
    }

    /// Returns the size in bits the value type takes up in the input data
    /// report. This is the single source of truth for field widths.
    pub fn size_bits(&self) -> usize {
        value::size_bits(*self)
    }

    /// Returns the size in bytes the value type takes up in the input data
    /// report, rounded up to a whole byte.
    pub fn size_bytes(&self) -> usize {
        self.size_bits().div_ceil(8)
    }

    /// Returns the sort priority of the value type to determine the order that
    /// these value types will appear in the input data report. Lower numbers
    /// are ordered first so that sub-byte values pack tightly at the front.
    pub fn order_priority(&self) -> u8 {
        match self {
            ValueType::Binary => 0,
            ValueType::UInt8 => 1,
            ValueType::UInt16 => 2,
            ValueType::Vector2 => 3,
            ValueType::Vector3 => 4,
            ValueType::Touch => 5,
        }
    }
}
