use std::error::Error;

use crate::{
    capability::Capability,
    reports::{
        input_capability_report::{InputCapabilityInfo, InputCapabilityReport},
        input_data_report::{InputDecodeError, InputEncodeError},
        ValueType,
    },
    value::{BoolValue, Int16Vector2Value, Int16Vector3Value, TouchValue, UInt8Value, Value},
};

fn touch_table() -> InputCapabilityReport {
    let mut report = InputCapabilityReport::default();
    report
        .add_capability(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_BUTTON_GUIDE, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_AXIS_LEFT_STICK, ValueType::Vector2)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_GYRO_LEFT, ValueType::Vector3)
        .expect("should add capability");
    report
        .add_capability(Capability::TOUCHPAD_CENTER_MOTION, ValueType::Touch)
        .expect("should add capability");
    report
}

fn sample_values() -> Vec<(Capability, Value)> {
    vec![
        (
            Capability::GAMEPAD_BUTTON_SOUTH,
            Value::Bool(BoolValue { value: true }),
        ),
        (
            Capability::GAMEPAD_BUTTON_GUIDE,
            Value::Bool(BoolValue { value: false }),
        ),
        (
            Capability::GAMEPAD_AXIS_LEFT_STICK,
            Value::Vector2(Int16Vector2Value { x: -1024, y: 512 }),
        ),
        (
            Capability::GAMEPAD_GYRO_LEFT,
            Value::Vector3(Int16Vector3Value {
                x: -32768,
                y: 32767,
                z: -1,
            }),
        ),
        (
            Capability::TOUCHPAD_CENTER_MOTION,
            Value::Touch(TouchValue {
                index: 2.into(),
                is_touching: true,
                pressure: 128,
                x: 1000,
                y: 60000,
            }),
        ),
    ]
}

#[tokio::test]
async fn test_roundtrip() -> Result<(), Box<dyn Error>> {
    let table = touch_table();
    let values = sample_values();

    let report = table
        .encode_data_report(&values, None)
        .expect("should encode");
    println!("Encoded report: {report:?}");
    assert_eq!(
        report.len(),
        2 + table.payload_size_bytes(),
        "report should be header plus payload"
    );

    let frame = table.decode_data_report(&report).expect("should decode");
    assert_eq!(frame.state_version(), 0, "first frame starts at version 0");
    for (capability, value) in values.iter() {
        assert_eq!(
            frame.get(*capability),
            Some(value),
            "decoded value for `{capability}` should match the encoded one"
        );
    }

    // Encoding is deterministic
    let report2 = table
        .encode_data_report(&values, None)
        .expect("should encode");
    assert_eq!(report, report2);

    Ok(())
}

#[tokio::test]
async fn test_unaligned_values() -> Result<(), Box<dyn Error>> {
    // A u8 at bit offset 1 straddles the first two payload bytes.
    let entries = vec![
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary, 0),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_TRIGGER_LEFT, ValueType::UInt8, 1),
    ];
    let table = InputCapabilityReport::new(1, 0, entries).expect("should validate");
    assert_eq!(table.total_bits(), 9);
    assert_eq!(table.payload_size_bytes(), 2);

    let values = vec![
        (
            Capability::GAMEPAD_BUTTON_SOUTH,
            Value::Bool(BoolValue { value: true }),
        ),
        (
            Capability::GAMEPAD_TRIGGER_LEFT,
            Value::UInt8(UInt8Value { value: 0xff }),
        ),
    ];
    let report = table
        .encode_data_report(&values, None)
        .expect("should encode");

    // Bit 0 is the high bit of payload byte 0; the u8 fills the remaining
    // seven bits of byte 0 and the top bit of byte 1.
    assert_eq!(report, vec![0x02, 0x00, 0xff, 0x80]);

    let frame = table.decode_data_report(&report).expect("should decode");
    assert_eq!(
        frame.get(Capability::GAMEPAD_TRIGGER_LEFT),
        Some(&Value::UInt8(UInt8Value { value: 0xff }))
    );

    Ok(())
}

#[tokio::test]
async fn test_state_version() -> Result<(), Box<dyn Error>> {
    let table = touch_table();
    let mut values = sample_values();

    let report = table
        .encode_data_report(&values, None)
        .expect("should encode");
    let first = table.decode_data_report(&report).expect("should decode");
    assert_eq!(first.state_version(), 0);

    // Unchanged values carry the version over
    let report = table
        .encode_data_report(&values, Some(&first))
        .expect("should encode");
    assert_eq!(report[1], 0, "version should not change for equal values");

    // A single changed value increments it
    values[0].1 = Value::Bool(BoolValue { value: false });
    let report = table
        .encode_data_report(&values, Some(&first))
        .expect("should encode");
    assert_eq!(report[1], 1, "version should increment on change");
    let second = table.decode_data_report(&report).expect("should decode");

    // And it stays flat again afterwards
    let report = table
        .encode_data_report(&values, Some(&second))
        .expect("should encode");
    assert_eq!(report[1], 1);

    Ok(())
}

#[tokio::test]
async fn test_state_version_wraps() -> Result<(), Box<dyn Error>> {
    let entries = vec![InputCapabilityInfo::with_offset(
        Capability::GAMEPAD_BUTTON_SOUTH,
        ValueType::Binary,
        0,
    )];
    let table = InputCapabilityReport::new(1, 0, entries).expect("should validate");

    // Craft a frame sitting at version 255
    let frame = table
        .decode_data_report(&[0x02, 0xff, 0x00])
        .expect("should decode");
    assert_eq!(frame.state_version(), 255);

    let values = vec![(
        Capability::GAMEPAD_BUTTON_SOUTH,
        Value::Bool(BoolValue { value: true }),
    )];
    let report = table
        .encode_data_report(&values, Some(&frame))
        .expect("should encode");
    assert_eq!(report[1], 0, "version should wrap from 255 to 0");

    Ok(())
}

#[tokio::test]
async fn test_encode_errors() -> Result<(), Box<dyn Error>> {
    let table = touch_table();

    // Every capability in the table needs a value
    let mut values = sample_values();
    values.pop();
    let result = table.encode_data_report(&values, None);
    assert!(matches!(
        result,
        Err(InputEncodeError::MissingCapabilityValue(
            Capability::TOUCHPAD_CENTER_MOTION
        ))
    ));

    // And the value variant has to match the table's value type
    let mut values = sample_values();
    values[0].1 = Value::UInt8(UInt8Value { value: 1 });
    let result = table.encode_data_report(&values, None);
    assert!(matches!(
        result,
        Err(InputEncodeError::ValueTypeMismatch {
            expected: ValueType::Binary,
            actual: ValueType::UInt8,
            ..
        })
    ));

    Ok(())
}

#[tokio::test]
async fn test_decode_errors() -> Result<(), Box<dyn Error>> {
    let table = touch_table();
    let values = sample_values();
    let report = table
        .encode_data_report(&values, None)
        .expect("should encode");

    // Wrong report id
    let mut wrong_id = report.clone();
    wrong_id[0] = 0x01;
    let result = table.decode_data_report(&wrong_id);
    assert!(matches!(
        result,
        Err(InputDecodeError::WrongReportId { actual: 0x01, .. })
    ));

    // A short report must fail instead of zero-filling
    let result = table.decode_data_report(&report[..report.len() - 1]);
    assert!(matches!(
        result,
        Err(InputDecodeError::BufferTooShort { .. })
    ));

    Ok(())
}
