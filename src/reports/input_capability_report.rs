use std::fmt::Display;

use packed_struct::{prelude::*, PackedStructInfo};
use thiserror::Error;

use crate::capability::Capability;

use super::{
    ReportType, UnknownValueType, ValueType, UNIFIED_SPEC_VERSION_MAJOR,
    UNIFIED_SPEC_VERSION_MINOR,
};

/// Maximum number of capabilities supported by the [InputCapabilityReport]
pub const INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES: usize = u8::MAX as usize;
/// Encoded size of a single [InputCapabilityInfo] entry
pub const INPUT_CAPABILITY_INFO_SIZE: usize = 5;
/// Encoded size of the [InputCapabilityReportHeader]
pub const INPUT_CAPABILITY_REPORT_HEADER_SIZE: usize = 4;
/// The maximum encoded size of the [InputCapabilityReport]
pub const INPUT_CAPABILITY_REPORT_SIZE: usize = INPUT_CAPABILITY_REPORT_HEADER_SIZE
    + INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES * INPUT_CAPABILITY_INFO_SIZE;

/// The [InputCapabilityReportHeader] defines the header for the
/// [InputCapabilityReport] that is used to describe the input capabilities of
/// the device and how to decode the input data report.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "4")]
pub struct InputCapabilityReportHeader {
    /// The report type, always [ReportType::InputCapabilityReport]
    #[packed_field(bytes = "0", ty = "enum")]
    pub report_type: ReportType,
    /// Major version indicates whether or not compatibility-breaking changes
    /// have occurred.
    #[packed_field(bytes = "1")]
    pub major_ver: u8,
    /// The minor version indicates what capabilities are available
    #[packed_field(bytes = "2")]
    pub minor_ver: u8,
    /// The number of input capabilities the device supports
    #[packed_field(bytes = "3")]
    pub capabilities_count: u8,
}

impl Default for InputCapabilityReportHeader {
    fn default() -> Self {
        Self {
            report_type: ReportType::InputCapabilityReport,
            major_ver: UNIFIED_SPEC_VERSION_MAJOR,
            minor_ver: UNIFIED_SPEC_VERSION_MINOR,
            capabilities_count: Default::default(),
        }
    }
}

/// [InputCapabilityInfo] describes a single input capability that a device
/// supports and how to decode its value in the input data report. A consuming
/// driver can use the offset to look for the value at a specific bit offset
/// and can use the value type to determine how to unpack the value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct InputCapabilityInfo {
    /// The capability
    pub capability: Capability,
    /// The type of value this capability emits
    pub value_type: ValueType,
    /// The bit offset in the data report payload where the value for this
    /// capability begins.
    pub offset: u16,
}

impl InputCapabilityInfo {
    pub fn new(capability: Capability, value_type: ValueType) -> Self {
        Self {
            capability,
            value_type,
            offset: 0,
        }
    }

    pub fn with_offset(capability: Capability, value_type: ValueType, offset: u16) -> Self {
        Self {
            capability,
            value_type,
            offset,
        }
    }

    /// The first bit in the payload past the end of this capability's value.
    pub fn end_offset(&self) -> usize {
        self.offset as usize + self.value_type.size_bits()
    }

    /// Packs the entry into its fixed 5-byte wire form.
    pub fn pack(&self) -> [u8; INPUT_CAPABILITY_INFO_SIZE] {
        let capability = self.capability.id().to_le_bytes();
        let offset = self.offset.to_le_bytes();
        [
            capability[0],
            capability[1],
            self.value_type.tag(),
            offset[0],
            offset[1],
        ]
    }

    /// Unpacks an entry from its fixed 5-byte wire form.
    pub fn unpack(src: &[u8; INPUT_CAPABILITY_INFO_SIZE]) -> Result<Self, UnknownValueType> {
        let capability = Capability::new(u16::from_le_bytes([src[0], src[1]]));
        let value_type = ValueType::from_tag(src[2])?;
        let offset = u16::from_le_bytes([src[3], src[4]]);
        Ok(Self {
            capability,
            value_type,
            offset,
        })
    }
}

impl Display for InputCapabilityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {:?} @ bit {}]",
            self.capability, self.value_type, self.offset
        )
    }
}

/// Possible errors when validating the layout described by a capability report
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("capability `{first}` occupying bits {first_start}..{first_end} overlaps capability `{second}` at bit {second_start}")]
    OverlappingLayout {
        first: Capability,
        first_start: u16,
        first_end: usize,
        second: Capability,
        second_start: u16,
    },
    #[error("capability `{0}` appears more than once in the capability report")]
    DuplicateCapability(Capability),
    #[error("capability report cannot hold {0} capabilities (maximum {INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES})")]
    TooManyCapabilities(usize),
}

/// Verify that no two entries occupy overlapping bit ranges and that no
/// capability appears twice. Returns the entries sorted by offset along with
/// the total payload length in bits.
///
/// This runs at capability-report decode time, never at data-report decode
/// time, because the data report buffer size is derived from the result.
fn validate_layout(
    mut entries: Vec<InputCapabilityInfo>,
) -> Result<(Vec<InputCapabilityInfo>, usize), LayoutError> {
    let mut ids: Vec<Capability> = entries.iter().map(|info| info.capability).collect();
    ids.sort_unstable();
    for pair in ids.windows(2) {
        if pair[0] == pair[1] {
            return Err(LayoutError::DuplicateCapability(pair[0]));
        }
    }

    entries.sort_by_key(|info| info.offset);
    for pair in entries.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.end_offset() > next.offset as usize {
            return Err(LayoutError::OverlappingLayout {
                first: prev.capability,
                first_start: prev.offset,
                first_end: prev.end_offset(),
                second: next.capability,
                second_start: next.offset,
            });
        }
    }

    let total_bits = entries.last().map(|info| info.end_offset()).unwrap_or(0);
    Ok((entries, total_bits))
}

/// Possible errors when decoding an [InputCapabilityReport] from bytes
#[derive(Error, Debug)]
pub enum CapabilityDecodeError {
    #[error("expected capability report id `{expected:#04x}`, got `{actual:#04x}`")]
    WrongReportId { expected: u8, actual: u8 },
    #[error("capability report truncated: needed {needed} bytes, got {actual}")]
    TruncatedReport { needed: usize, actual: usize },
    #[error(transparent)]
    UnknownValueType(#[from] UnknownValueType),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Possible errors when adding a capability to an [InputCapabilityReport]
#[derive(Error, Debug)]
pub enum AddCapabilityError {
    #[error(
        "adding capability `{capability}` would exceed maximum number of capabilities `{size}`"
    )]
    MaxCapabilitiesExceeded { capability: Capability, size: usize },
}

/// The [InputCapabilityReport] describes the input capabilities of the device
/// and how to decode the input data report.
///
/// A decoded report is the validated layout table for one device session: its
/// entries are sorted by bit offset, no two entries overlap, and the total
/// payload size is precomputed. When a device sends a new capability report
/// the old table is replaced wholesale, since a capability change implies a
/// layout change.
#[derive(Debug, Clone, PartialEq)]
pub struct InputCapabilityReport {
    header: InputCapabilityReportHeader,
    capabilities: Vec<InputCapabilityInfo>,
    total_bits: usize,
}

impl Default for InputCapabilityReport {
    fn default() -> Self {
        Self {
            header: InputCapabilityReportHeader::default(),
            capabilities: Vec::new(),
            total_bits: 0,
        }
    }
}

impl Display for InputCapabilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caps: Vec<String> = self
            .capabilities
            .iter()
            .map(|cap| format!("{cap}"))
            .collect();
        let body = caps.join("");

        write!(
            f,
            "InputCapabilityReport v{}.{} {body}",
            self.header.major_ver, self.header.minor_ver
        )
    }
}

impl InputCapabilityReport {
    /// Create a validated capability report from explicit entries. Used on the
    /// device side when offsets are assigned by hand; entries are sorted by
    /// offset and checked for overlap.
    pub fn new(
        major_ver: u8,
        minor_ver: u8,
        entries: Vec<InputCapabilityInfo>,
    ) -> Result<Self, LayoutError> {
        if entries.len() > INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES {
            return Err(LayoutError::TooManyCapabilities(entries.len()));
        }
        let count = entries.len() as u8;
        let (capabilities, total_bits) = validate_layout(entries)?;
        Ok(Self {
            header: InputCapabilityReportHeader {
                major_ver,
                minor_ver,
                capabilities_count: count,
                ..Default::default()
            },
            capabilities,
            total_bits,
        })
    }

    /// The (major, minor) version pair the device advertised.
    pub fn version(&self) -> (u8, u8) {
        (self.header.major_ver, self.header.minor_ver)
    }

    pub fn major_version(&self) -> u8 {
        self.header.major_ver
    }

    pub fn minor_version(&self) -> u8 {
        self.header.minor_ver
    }

    /// Return all capabilities in the [InputCapabilityReport], sorted by bit
    /// offset.
    pub fn capabilities(&self) -> &[InputCapabilityInfo] {
        self.capabilities.as_slice()
    }

    /// Get the capability information for the given capability
    pub fn get_capability(&self, capability: Capability) -> Option<InputCapabilityInfo> {
        self.capabilities
            .iter()
            .find(|info| info.capability == capability)
            .copied()
    }

    /// Total payload length in bits required by this layout.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Total payload length in whole bytes required by this layout.
    pub fn payload_size_bytes(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Packs the report into its wire form.
    pub fn pack_to_vec(&self) -> Result<Vec<u8>, PackingError> {
        let header_size_bytes = InputCapabilityReportHeader::packed_bits() / 8;
        let caps_size_bytes = self.capabilities.len() * INPUT_CAPABILITY_INFO_SIZE;
        let mut data = Vec::with_capacity(header_size_bytes + caps_size_bytes);

        let header = self.header.pack()?;
        data.extend_from_slice(&header);

        for capability in self.capabilities.iter() {
            data.extend_from_slice(&capability.pack());
        }

        Ok(data)
    }

    /// Unpacks a capability report from raw bytes, validating the layout it
    /// describes. This is a pure function of the input bytes.
    pub fn unpack(src: &[u8]) -> Result<Self, CapabilityDecodeError> {
        if src.len() < INPUT_CAPABILITY_REPORT_HEADER_SIZE {
            return Err(CapabilityDecodeError::TruncatedReport {
                needed: INPUT_CAPABILITY_REPORT_HEADER_SIZE,
                actual: src.len(),
            });
        }
        let report_id = src[0];
        if report_id != ReportType::InputCapabilityReport as u8 {
            return Err(CapabilityDecodeError::WrongReportId {
                expected: ReportType::InputCapabilityReport as u8,
                actual: report_id,
            });
        }

        let major_ver = src[1];
        let minor_ver = src[2];
        let num_capabilities = src[3] as usize;

        let needed = INPUT_CAPABILITY_REPORT_HEADER_SIZE
            + num_capabilities * INPUT_CAPABILITY_INFO_SIZE;
        if src.len() < needed {
            return Err(CapabilityDecodeError::TruncatedReport {
                needed,
                actual: src.len(),
            });
        }

        let mut entries = Vec::with_capacity(num_capabilities);
        let mut byte_start = INPUT_CAPABILITY_REPORT_HEADER_SIZE;
        for _ in 0..num_capabilities {
            let byte_end = byte_start + INPUT_CAPABILITY_INFO_SIZE;
            let buffer: &[u8; INPUT_CAPABILITY_INFO_SIZE] = src[byte_start..byte_end]
                .try_into()
                .map_err(|_err| CapabilityDecodeError::TruncatedReport {
                    needed,
                    actual: src.len(),
                })?;
            entries.push(InputCapabilityInfo::unpack(buffer)?);
            byte_start = byte_end;
        }

        let (capabilities, total_bits) = validate_layout(entries)?;
        log::trace!(
            "Decoded capability report v{major_ver}.{minor_ver} with {num_capabilities} capabilities ({total_bits} payload bits)"
        );

        Ok(Self {
            header: InputCapabilityReportHeader {
                major_ver,
                minor_ver,
                capabilities_count: num_capabilities as u8,
                ..Default::default()
            },
            capabilities,
            total_bits,
        })
    }
}

impl InputCapabilityReport {
    /// Add the given capability to the capability report, assigning bit
    /// offsets automatically. Values are grouped by type so that sub-byte
    /// values pack tightly at the front of the payload and everything else
    /// stays byte-aligned.
    pub fn add_capability(
        &mut self,
        capability: Capability,
        value_type: ValueType,
    ) -> Result<(), AddCapabilityError> {
        if self.capabilities.len() == INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES {
            return Err(AddCapabilityError::MaxCapabilitiesExceeded {
                capability,
                size: INPUT_CAPABILITY_REPORT_MAX_CAPABILITIES,
            });
        }

        // Ensure that the capability doesn't already exist
        let exists = self
            .capabilities
            .iter()
            .any(|cap| cap.capability == capability);
        if exists {
            return Ok(());
        }

        self.header.capabilities_count += 1;
        self.capabilities
            .push(InputCapabilityInfo::new(capability, value_type));

        // Group the capabilities by value type to pack values close to each
        // other.
        self.capabilities
            .sort_by_key(|cap| cap.value_type.order_priority());
        self.update_capability_offsets();

        Ok(())
    }

    /// Removes the given capability from the capability report
    pub fn remove_capability(&mut self, capability: Capability) {
        self.capabilities.retain(|cap| cap.capability != capability);
        self.header.capabilities_count = self.capabilities.len() as u8;
        self.update_capability_offsets();
    }

    /// Updates the `offset` bits of all capabilities
    fn update_capability_offsets(&mut self) {
        let mut offset = 0;
        for cap in self.capabilities.iter_mut() {
            // Non-binary values should be byte-aligned
            let offset_remainder = offset % 8;
            if cap.value_type != ValueType::Binary && offset_remainder != 0 {
                offset += 8 - offset_remainder;
            }

            cap.offset = offset as u16;
            offset += cap.value_type.size_bits();
        }
        self.total_bits = offset;
    }
}
