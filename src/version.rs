//! Compatibility rules between a device's advertised protocol version and the
//! version this consumer understands.

use thiserror::Error;

use crate::reports::{
    input_capability_report::InputCapabilityReport, UNIFIED_SPEC_VERSION_MAJOR,
    UNIFIED_SPEC_VERSION_MINOR,
};

/// Possible errors when checking version compatibility
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionError {
    /// Major version bumps signal breaking layout changes; a consumer cannot
    /// safely interpret a capability report from a different major version.
    #[error("device major version v{device} is not compatible with this implementation (v{supported})")]
    VersionIncompatible { device: u8, supported: u8 },
}

/// Outcome of a successful compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// The device's minor version is at or below ours; every capability it
    /// advertises can be understood.
    Full,
    /// The device's minor version is newer than ours. The capability report
    /// stays usable as-is, but it may contain capabilities this
    /// implementation does not recognize. Those are retained in the table
    /// and in decoded frames for passthrough but are skipped when presenting
    /// values to application logic.
    NewerMinor,
}

/// [VersionPolicy] holds the protocol version a consumer understands and
/// decides whether a device's capability report can be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPolicy {
    supported_major: u8,
    supported_minor: u8,
}

impl Default for VersionPolicy {
    fn default() -> Self {
        Self {
            supported_major: UNIFIED_SPEC_VERSION_MAJOR,
            supported_minor: UNIFIED_SPEC_VERSION_MINOR,
        }
    }
}

impl VersionPolicy {
    /// A policy for a consumer that understands the given version instead of
    /// the crate's own supported version.
    pub fn new(supported_major: u8, supported_minor: u8) -> Self {
        Self {
            supported_major,
            supported_minor,
        }
    }

    pub fn supported_version(&self) -> (u8, u8) {
        (self.supported_major, self.supported_minor)
    }

    /// Check whether a capability report from the given device version can be
    /// interpreted under this policy.
    pub fn check(&self, table: &InputCapabilityReport) -> Result<Compatibility, VersionError> {
        let (major, minor) = table.version();
        if major != self.supported_major {
            return Err(VersionError::VersionIncompatible {
                device: major,
                supported: self.supported_major,
            });
        }
        if minor > self.supported_minor {
            return Ok(Compatibility::NewerMinor);
        }
        Ok(Compatibility::Full)
    }
}
