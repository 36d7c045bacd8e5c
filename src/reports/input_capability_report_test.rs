use std::error::Error;

use crate::{
    capability::Capability,
    reports::{
        input_capability_report::{
            CapabilityDecodeError, InputCapabilityInfo, InputCapabilityReport, LayoutError,
        },
        ReportType, ValueType,
    },
};

#[tokio::test]
async fn test_packing() -> Result<(), Box<dyn Error>> {
    let mut report = InputCapabilityReport::default();
    report
        .add_capability(Capability::GAMEPAD_BUTTON_START, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_BUTTON_SELECT, ValueType::Binary)
        .expect("should add capability");
    report
        .get_capability(Capability::GAMEPAD_BUTTON_SELECT)
        .expect("should have added the capability");

    // Pack the report
    let bytes = report.pack_to_vec().expect("should pack to bytes");
    println!("Got bytes: {bytes:?}");
    assert_eq!(bytes[0], ReportType::InputCapabilityReport as u8);
    assert_eq!(bytes[3], 2, "count byte should hold both capabilities");
    assert_eq!(bytes.len(), 4 + 2 * 5);

    // Unpack the report
    let unpacked_report =
        InputCapabilityReport::unpack(bytes.as_slice()).expect("should have unpacked");

    println!("Got unpacked report: {unpacked_report}");

    assert_eq!(
        format!("{report}"),
        format!("{unpacked_report}"),
        "unpacked report should match original"
    );

    Ok(())
}

#[tokio::test]
async fn test_auto_offsets() -> Result<(), Box<dyn Error>> {
    let mut report = InputCapabilityReport::default();
    report
        .add_capability(Capability::GAMEPAD_BUTTON_GUIDE, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_AXIS_LEFT_STICK, ValueType::Vector2)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_GYRO_LEFT, ValueType::Vector3)
        .expect("should add capability");

    // Binary values pack tightly at the front, everything else lands on a
    // byte boundary after them.
    let offsets: Vec<u16> = report.capabilities().iter().map(|info| info.offset).collect();
    assert_eq!(offsets, vec![0, 1, 8, 40]);
    assert_eq!(report.total_bits(), 88);
    assert_eq!(report.payload_size_bytes(), 11);

    report.remove_capability(Capability::GAMEPAD_AXIS_LEFT_STICK);
    let offsets: Vec<u16> = report.capabilities().iter().map(|info| info.offset).collect();
    assert_eq!(offsets, vec![0, 1, 8], "offsets should be recomputed");
    assert_eq!(report.total_bits(), 56);

    Ok(())
}

#[tokio::test]
async fn test_overlap_detection() -> Result<(), Box<dyn Error>> {
    // A 32-bit vector at bit 8 runs through bit 40, colliding with a value
    // at bit 32.
    let entries = vec![
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_AXIS_LEFT_STICK, ValueType::Vector2, 8),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_GYRO_LEFT, ValueType::Vector3, 32),
    ];
    let result = InputCapabilityReport::new(1, 0, entries.clone());
    assert!(
        matches!(result, Err(LayoutError::OverlappingLayout { .. })),
        "overlapping entries should be rejected"
    );

    // Input order must not matter
    let reversed: Vec<InputCapabilityInfo> = entries.into_iter().rev().collect();
    let result = InputCapabilityReport::new(1, 0, reversed);
    assert!(matches!(result, Err(LayoutError::OverlappingLayout { .. })));

    // Equal offsets are an overlap too
    let entries = vec![
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary, 0),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_EAST, ValueType::Binary, 0),
    ];
    let result = InputCapabilityReport::new(1, 0, entries);
    assert!(matches!(result, Err(LayoutError::OverlappingLayout { .. })));

    // Non-intersecting entries validate regardless of order
    let entries = vec![
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_GYRO_LEFT, ValueType::Vector3, 40),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary, 1),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_AXIS_LEFT_STICK, ValueType::Vector2, 8),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_GUIDE, ValueType::Binary, 0),
    ];
    let report = InputCapabilityReport::new(1, 0, entries).expect("should validate");
    assert_eq!(report.total_bits(), 88);
    let offsets: Vec<u16> = report.capabilities().iter().map(|info| info.offset).collect();
    assert_eq!(offsets, vec![0, 1, 8, 40], "entries should come out sorted");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_capability() -> Result<(), Box<dyn Error>> {
    let entries = vec![
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary, 0),
        InputCapabilityInfo::with_offset(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary, 1),
    ];
    let result = InputCapabilityReport::new(1, 0, entries);
    assert!(matches!(
        result,
        Err(LayoutError::DuplicateCapability(
            Capability::GAMEPAD_BUTTON_SOUTH
        ))
    ));

    // The builder silently ignores duplicate adds instead
    let mut report = InputCapabilityReport::default();
    report
        .add_capability(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary)
        .expect("should add capability");
    report
        .add_capability(Capability::GAMEPAD_BUTTON_SOUTH, ValueType::Binary)
        .expect("duplicate add should be a no-op");
    assert_eq!(report.capabilities().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_malformed_reports() -> Result<(), Box<dyn Error>> {
    // Wrong report id
    let result = InputCapabilityReport::unpack(&[0x02, 1, 0, 0]);
    assert!(matches!(
        result,
        Err(CapabilityDecodeError::WrongReportId { actual: 0x02, .. })
    ));

    // Header alone is too short
    let result = InputCapabilityReport::unpack(&[0x01, 1]);
    assert!(matches!(
        result,
        Err(CapabilityDecodeError::TruncatedReport { .. })
    ));

    // Count promises one entry but the bytes run out
    let result = InputCapabilityReport::unpack(&[0x01, 1, 0, 1, 0x30, 0x01]);
    assert!(matches!(
        result,
        Err(CapabilityDecodeError::TruncatedReport {
            needed: 9,
            actual: 6
        })
    ));

    // Value type tag outside the defined set
    let result = InputCapabilityReport::unpack(&[0x01, 1, 0, 1, 0x30, 0x01, 0xaa, 0x00, 0x00]);
    assert!(matches!(
        result,
        Err(CapabilityDecodeError::UnknownValueType(_))
    ));

    Ok(())
}
