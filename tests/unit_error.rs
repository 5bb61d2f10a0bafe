use std::path::PathBuf;

use taskpulse::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    assert_eq!(Error::NoDataSource.exit_code(), exit_codes::USER_ERROR);

    let source = Error::Source {
        path: PathBuf::from("export.json"),
        reason: "missing".to_string(),
    };
    assert_eq!(source.exit_code(), exit_codes::SOURCE_UNAVAILABLE);

    let op = Error::OperationFailed("boom".to_string());
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn json_error_includes_code_and_details() {
    let err = Error::ProjectNotFound("Website".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert!(json.error.contains("Project not found"));
    assert_eq!(
        json.details,
        Some(serde_json::json!({ "query": "Website" }))
    );
}

#[test]
fn source_error_details_carry_path() {
    let err = Error::Source {
        path: PathBuf::from("/data/export.json"),
        reason: "malformed export".to_string(),
    };
    let details = err.details().expect("details");
    assert_eq!(details["path"], "/data/export.json");
    assert_eq!(details["reason"], "malformed export");
}
