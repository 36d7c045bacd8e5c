use thiserror::Error;

use crate::{
    bits::{BitReader, BitWriter},
    capability::Capability,
    registry,
    value::{Value, ValueCodecError},
};

use super::{input_capability_report::InputCapabilityReport, ReportType, ValueType};

/// Encoded size of the input data report header (report id + state version)
pub const INPUT_DATA_REPORT_HEADER_SIZE: usize = 2;

/// One decoded input data report: the state version plus a typed value for
/// every capability in the capability report, in layout order.
///
/// Frames are produced per received report and consumed immediately; the
/// codec never retains them. A caller that keeps the previous frame can skip
/// decoding entirely whenever a report carries the same state version, since
/// the version only changes when at least one value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    state_version: u8,
    values: Vec<(Capability, Value)>,
}

impl DataFrame {
    pub fn state_version(&self) -> u8 {
        self.state_version
    }

    /// All decoded values in capability layout order, including values for
    /// capabilities this implementation does not recognize. Useful for
    /// re-export/passthrough.
    pub fn values(&self) -> &[(Capability, Value)] {
        self.values.as_slice()
    }

    /// The value decoded for the given capability, if the capability report
    /// contained it.
    pub fn get(&self, capability: Capability) -> Option<&Value> {
        self.values
            .iter()
            .find(|(cap, _)| *cap == capability)
            .map(|(_, value)| value)
    }

    /// Values for presentation to application logic. Capabilities with no
    /// entry in [crate::registry] are skipped; they typically come from a
    /// newer minor protocol version and stay available through [Self::values]
    /// for passthrough.
    pub fn recognized(&self) -> impl Iterator<Item = (Capability, &Value)> {
        self.values
            .iter()
            .filter(|(cap, _)| registry::describe(*cap).is_some())
            .map(|(cap, value)| (*cap, value))
    }
}

/// Possible errors when decoding an input data report
#[derive(Error, Debug)]
pub enum InputDecodeError {
    #[error("expected data report id `{expected:#04x}`, got `{actual:#04x}`")]
    WrongReportId { expected: u8, actual: u8 },
    #[error("data report payload too short: need {needed_bits} bits, got {available_bits}")]
    BufferTooShort {
        needed_bits: usize,
        available_bits: usize,
    },
    #[error("failed to decode value: {0}")]
    Value(#[from] ValueCodecError),
}

/// Possible errors when encoding an input data report
#[derive(Error, Debug)]
pub enum InputEncodeError {
    #[error("no value supplied for capability `{0}`")]
    MissingCapabilityValue(Capability),
    #[error("value of type `{actual:?}` supplied for capability `{capability}` which expects `{expected:?}`")]
    ValueTypeMismatch {
        capability: Capability,
        expected: ValueType,
        actual: ValueType,
    },
    #[error("failed to encode value for capability `{capability}`: {source}")]
    Value {
        capability: Capability,
        source: ValueCodecError,
    },
}

impl InputCapabilityReport {
    /// Decode the given input data report bytes according to the capability
    /// report. This is a pure function of its inputs: it reads values
    /// directly out of `src` without copying the payload and allocates only
    /// the resulting [DataFrame].
    pub fn decode_data_report(&self, src: &[u8]) -> Result<DataFrame, InputDecodeError> {
        if src.is_empty() || src[0] != ReportType::InputDataReport as u8 {
            return Err(InputDecodeError::WrongReportId {
                expected: ReportType::InputDataReport as u8,
                actual: src.first().copied().unwrap_or(0),
            });
        }
        let payload = &src[1..];
        let Some((&state_version, payload)) = payload.split_first() else {
            return Err(InputDecodeError::BufferTooShort {
                needed_bits: self.total_bits(),
                available_bits: 0,
            });
        };

        let available_bits = payload.len() * 8;
        if available_bits < self.total_bits() {
            return Err(InputDecodeError::BufferTooShort {
                needed_bits: self.total_bits(),
                available_bits,
            });
        }

        let mut reader = BitReader::new(payload);
        let mut values = Vec::with_capacity(self.capabilities().len());
        for info in self.capabilities() {
            reader.seek(info.offset as usize);
            let value = Value::decode(info.value_type, &mut reader)?;
            values.push((info.capability, value));
        }

        Ok(DataFrame {
            state_version,
            values,
        })
    }

    /// Encode an input data report carrying one value per capability in this
    /// report. `values` must supply a value of the matching type for every
    /// capability; order does not matter.
    ///
    /// `previous` is the last frame this device encoded, if any. The state
    /// version carries over from it unchanged when every value is identical
    /// and increments (wrapping) when any value differs, so that consumers
    /// can skip decoding unchanged reports. The first frame of a session
    /// starts at state version 0.
    ///
    /// Given the same table, values, and previous frame, the output is
    /// byte-for-byte deterministic.
    pub fn encode_data_report(
        &self,
        values: &[(Capability, Value)],
        previous: Option<&DataFrame>,
    ) -> Result<Vec<u8>, InputEncodeError> {
        let mut report =
            vec![0; INPUT_DATA_REPORT_HEADER_SIZE + self.payload_size_bytes()];
        report[0] = ReportType::InputDataReport as u8;

        let mut changed = previous.is_none();
        {
            let (_header, payload) = report.split_at_mut(INPUT_DATA_REPORT_HEADER_SIZE);
            let mut writer = BitWriter::new(payload);
            for info in self.capabilities() {
                let value = values
                    .iter()
                    .find(|(cap, _)| *cap == info.capability)
                    .map(|(_, value)| value)
                    .ok_or(InputEncodeError::MissingCapabilityValue(info.capability))?;

                let actual = value.value_type();
                if actual != info.value_type {
                    return Err(InputEncodeError::ValueTypeMismatch {
                        capability: info.capability,
                        expected: info.value_type,
                        actual,
                    });
                }

                writer.seek(info.offset as usize);
                value
                    .encode(info.value_type, &mut writer)
                    .map_err(|source| InputEncodeError::Value {
                        capability: info.capability,
                        source,
                    })?;

                if let Some(previous) = previous {
                    if previous.get(info.capability) != Some(value) {
                        changed = true;
                    }
                }
            }
        }

        report[1] = match previous {
            Some(previous) if changed => previous.state_version().wrapping_add(1),
            Some(previous) => previous.state_version(),
            None => 0,
        };
        log::trace!("Encoded data report: {report:?}");

        Ok(report)
    }
}
