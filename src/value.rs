//! Typed input values and their wire shapes.
//!
//! Each [crate::reports::ValueType] tag corresponds to exactly one packed
//! value structure here. The packed structures define the byte-level layout
//! of a value; placing that layout at an arbitrary bit offset inside a data
//! report payload is handled by the bit cursors in [crate::bits].

use packed_struct::{prelude::*, PackedStructInfo};
use thiserror::Error;

use crate::{
    bits::{BitRangeError, BitReader, BitWriter},
    reports::ValueType,
};

/// Possible errors when decoding or encoding a single value.
#[derive(Error, Debug)]
pub enum ValueCodecError {
    #[error("expected a value of type `{expected:?}`, got `{actual:?}`")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },
    #[error(transparent)]
    OutOfRange(#[from] BitRangeError),
    #[error("failed to pack or unpack value bytes: {0}")]
    Packing(#[from] PackingError),
}

/// [Value] defines all the possible values that a unified gamepad can report.
/// The active variant is always determined by the [ValueType] of the
/// capability it was decoded against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(BoolValue),
    UInt8(UInt8Value),
    UInt16(UInt16Value),
    Vector2(Int16Vector2Value),
    Vector3(Int16Vector3Value),
    Touch(TouchValue),
}

impl Value {
    /// Return the [ValueType] for this [Value]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Binary,
            Value::UInt8(_) => ValueType::UInt8,
            Value::UInt16(_) => ValueType::UInt16,
            Value::Vector2(_) => ValueType::Vector2,
            Value::Vector3(_) => ValueType::Vector3,
            Value::Touch(_) => ValueType::Touch,
        }
    }

    /// Decode a value of the given type at the reader's current position.
    pub fn decode(value_type: ValueType, reader: &mut BitReader) -> Result<Self, ValueCodecError> {
        let value = match value_type {
            ValueType::Binary => Value::Bool(BoolValue {
                value: reader.read_bit()?,
            }),
            ValueType::UInt8 => {
                let mut buf = [0; 1];
                reader.read_bytes(&mut buf)?;
                Value::UInt8(UInt8Value::unpack(&buf)?)
            }
            ValueType::UInt16 => {
                let mut buf = [0; 2];
                reader.read_bytes(&mut buf)?;
                Value::UInt16(UInt16Value::unpack(&buf)?)
            }
            ValueType::Vector2 => {
                let mut buf = [0; 4];
                reader.read_bytes(&mut buf)?;
                Value::Vector2(Int16Vector2Value::unpack(&buf)?)
            }
            ValueType::Vector3 => {
                let mut buf = [0; 6];
                reader.read_bytes(&mut buf)?;
                Value::Vector3(Int16Vector3Value::unpack(&buf)?)
            }
            ValueType::Touch => {
                let mut buf = [0; 6];
                reader.read_bytes(&mut buf)?;
                Value::Touch(TouchValue::unpack(&buf)?)
            }
        };

        Ok(value)
    }

    /// Encode this value at the writer's current position. The value's
    /// variant must match the expected type from the capability layout.
    pub fn encode(
        &self,
        expected: ValueType,
        writer: &mut BitWriter,
    ) -> Result<(), ValueCodecError> {
        let actual = self.value_type();
        if actual != expected {
            return Err(ValueCodecError::TypeMismatch { expected, actual });
        }

        match self {
            Value::Bool(value) => writer.write_bit(value.value)?,
            Value::UInt8(value) => writer.write_bytes(&value.pack()?)?,
            Value::UInt16(value) => writer.write_bytes(&value.pack()?)?,
            Value::Vector2(value) => writer.write_bytes(&value.pack()?)?,
            Value::Vector3(value) => writer.write_bytes(&value.pack()?)?,
            Value::Touch(value) => writer.write_bytes(&value.pack()?)?,
        }

        Ok(())
    }
}

/// [BoolValue] defines boolean values, typically used for inputs like buttons
/// or switches.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bits = "1")]
pub struct BoolValue {
    #[packed_field(bits = "0")]
    pub value: bool,
}

/// [UInt8Value] defines u8 values, typically used for low resolution trigger
/// inputs.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "1")]
pub struct UInt8Value {
    #[packed_field(bytes = "0")]
    pub value: u8,
}

/// [UInt16Value] defines u16 values, typically used for higher resolution
/// trigger inputs.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub struct UInt16Value {
    #[packed_field(bytes = "0..=1", endian = "lsb")]
    pub value: u16,
}

/// [Int16Vector2Value] defines signed (x, y) values, typically used for
/// inputs with two centered axes like analog sticks.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "4")]
pub struct Int16Vector2Value {
    #[packed_field(bytes = "0..=1", endian = "lsb")]
    pub x: i16,
    #[packed_field(bytes = "2..=3", endian = "lsb")]
    pub y: i16,
}

/// [Int16Vector3Value] defines signed (x, y, z) values, typically used for
/// accelerometer, gyroscope, or magnetometer input.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "6")]
pub struct Int16Vector3Value {
    #[packed_field(bytes = "0..=1", endian = "lsb")]
    pub x: i16,
    #[packed_field(bytes = "2..=3", endian = "lsb")]
    pub y: i16,
    #[packed_field(bytes = "4..=5", endian = "lsb")]
    pub z: i16,
}

/// [TouchValue] defines one touch sample from a touch surface.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "6")]
pub struct TouchValue {
    /// The finger id of the touch input for multi-touch devices.
    #[packed_field(bits = "0..=6")]
    pub index: Integer<u8, packed_bits::Bits<7>>,
    /// Whether or not the device is sensing touch.
    #[packed_field(bits = "7")]
    pub is_touching: bool,
    /// Optionally the amount of pressure the touch is experiencing, normalized
    /// between 0 and 255.
    #[packed_field(bytes = "1")]
    pub pressure: u8,
    /// The X position of the touch, where 0 is the left side of the input
    /// device and 65535 is the right side.
    #[packed_field(bytes = "2..=3", endian = "lsb")]
    pub x: u16,
    /// The Y position of the touch, where 0 is the top side of the input
    /// device and 65535 is the bottom side.
    #[packed_field(bytes = "4..=5", endian = "lsb")]
    pub y: u16,
}

/// Width table used by every component that needs to know how many bits a
/// value occupies in the data report payload.
pub(crate) fn size_bits(value_type: ValueType) -> usize {
    match value_type {
        ValueType::Binary => BoolValue::packed_bits(),
        ValueType::UInt8 => UInt8Value::packed_bits(),
        ValueType::UInt16 => UInt16Value::packed_bits(),
        ValueType::Vector2 => Int16Vector2Value::packed_bits(),
        ValueType::Vector3 => Int16Vector3Value::packed_bits(),
        ValueType::Touch => TouchValue::packed_bits(),
    }
}
