use uinv_lib::error::ErrorCategory;
use uinv_lib::InventoryError;

#[test]
fn config_error_display_includes_message() {
    let err = InventoryError::Config("blank volatile attribute".to_string());

    assert_eq!(
        format!("{}", err),
        "Configuration error: blank volatile attribute"
    );
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: InventoryError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn not_found_helper_uses_message() {
    let err = InventoryError::not_found("capture 'c9' not in snapshot");

    assert_eq!(format!("{}", err), "Not found: capture 'c9' not in snapshot");
    assert_eq!(err.to_payload().category, ErrorCategory::NotFound);
}

#[test]
fn malformed_snapshot_is_an_input_error() {
    let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
    let err: InventoryError = json_err.into();
    let payload = err.to_payload();

    assert!(format!("{}", err).starts_with("Serialization error: "));
    assert_eq!(payload.category, ErrorCategory::Input);
    assert!(payload.remediation.is_some());
}
