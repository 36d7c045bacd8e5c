//! Per-device session state.
//!
//! The codec itself is stateless; everything a consumer has to remember about
//! one device between reports lives in a [DeviceSession] owned by the caller.
//! Independent devices use independent sessions and need no coordination.

use thiserror::Error;

use crate::{
    capability::Capability,
    registry,
    reports::{
        input_capability_report::{CapabilityDecodeError, InputCapabilityReport},
        input_data_report::{DataFrame, InputDecodeError},
        ReportType,
    },
    value::Value,
    version::{Compatibility, VersionError, VersionPolicy},
};

/// A single changed input, emitted when a new frame differs from the previous
/// one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    pub capability: Capability,
    pub value: Value,
}

/// Outcome of feeding one raw report to a [DeviceSession].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// The report carried nothing actionable: either an ignored report type
    /// or a data report whose state version matched the cached frame, which
    /// means no value changed and decoding was skipped.
    None,
    /// A capability report replaced the session's layout table. Any cached
    /// frame was dropped, since a capability change implies a layout change.
    Capabilities(Compatibility),
    /// A data report was decoded into a new frame. `events` holds the values
    /// that changed relative to the previous frame (empty when this is the
    /// first frame), filtered to capabilities the registry recognizes.
    Frame {
        frame: DataFrame,
        events: Vec<Event>,
    },
}

/// Possible errors when handling a report in a [DeviceSession]
///
/// All of these are recoverable: the caller should drop the offending report
/// and keep listening. The exception is [SessionError::Version], which
/// repeats for every capability report the device sends and is terminal for
/// the session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("received an empty report")]
    EmptyReport,
    #[error("received a data report before any capability report")]
    MissingCapabilities,
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("failed to decode capability report: {0}")]
    Capability(#[from] CapabilityDecodeError),
    #[error("failed to decode data report: {0}")]
    Data(#[from] InputDecodeError),
}

/// [DeviceSession] tracks the current capability layout and the last decoded
/// frame for one device, dispatching raw reports to the right codec path.
#[derive(Debug, Default)]
pub struct DeviceSession {
    policy: VersionPolicy,
    capabilities: Option<InputCapabilityReport>,
    last_frame: Option<DataFrame>,
}

impl DeviceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose consumer understands a different protocol version than
    /// the crate default.
    pub fn with_policy(policy: VersionPolicy) -> Self {
        Self {
            policy,
            capabilities: None,
            last_frame: None,
        }
    }

    /// The device's current capability report, if one has been received.
    pub fn capabilities(&self) -> Option<&InputCapabilityReport> {
        self.capabilities.as_ref()
    }

    /// The most recently decoded frame, if any.
    pub fn last_frame(&self) -> Option<&DataFrame> {
        self.last_frame.as_ref()
    }

    /// Handle one raw report from the device.
    ///
    /// Capability reports are version-checked and replace the cached layout
    /// wholesale. Data reports are decoded against the cached layout, with a
    /// fast path: when the report's state version equals the cached frame's,
    /// no value has changed and the payload is not decoded at all.
    pub fn handle_report(&mut self, buf: &[u8]) -> Result<SessionUpdate, SessionError> {
        let Some(&report_id) = buf.first() else {
            return Err(SessionError::EmptyReport);
        };

        match ReportType::from(report_id) {
            ReportType::InputCapabilityReport => {
                let report = InputCapabilityReport::unpack(buf)?;
                let compatibility = self.policy.check(&report)?;
                if compatibility == Compatibility::NewerMinor {
                    log::debug!(
                        "Device minor version v{} is newer than supported v{}; unknown capabilities will not be presented",
                        report.minor_version(),
                        self.policy.supported_version().1,
                    );
                }
                self.capabilities = Some(report);
                self.last_frame = None;
                Ok(SessionUpdate::Capabilities(compatibility))
            }
            ReportType::InputDataReport => self.handle_data_report(buf),
            other => {
                log::warn!("Ignoring unsupported report type {other:?} ({report_id:#04x})");
                Ok(SessionUpdate::None)
            }
        }
    }

    fn handle_data_report(&mut self, buf: &[u8]) -> Result<SessionUpdate, SessionError> {
        let Some(capabilities) = self.capabilities.as_ref() else {
            return Err(SessionError::MissingCapabilities);
        };

        // Unchanged state version means no value changed; skip decoding.
        if let (Some(last), Some(&version)) = (self.last_frame.as_ref(), buf.get(1)) {
            if last.state_version() == version {
                log::trace!("State version {version} unchanged, skipping decode");
                return Ok(SessionUpdate::None);
            }
        }

        let frame = capabilities.decode_data_report(buf)?;
        let events = match self.last_frame.as_ref() {
            Some(last) => changed_values(last, &frame),
            None => Vec::new(),
        };
        self.last_frame = Some(frame.clone());

        Ok(SessionUpdate::Frame { frame, events })
    }
}

/// Collect the values in `new` that differ from `old`, skipping capabilities
/// the registry does not recognize. Both frames must have been decoded
/// against the same capability report.
fn changed_values(old: &DataFrame, new: &DataFrame) -> Vec<Event> {
    let mut events = Vec::new();
    for ((capability, old_value), (_, new_value)) in old.values().iter().zip(new.values().iter()) {
        if old_value == new_value {
            continue;
        }
        if registry::describe(*capability).is_none() {
            continue;
        }
        events.push(Event {
            capability: *capability,
            value: *new_value,
        });
    }
    events
}
