// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::{ExitCode, MachineError, ResultExt};

#[test]
fn result_ext_attaches_static_context() {
    let r: Result<(), &str> = Err("disk full");
    let err = r.with_context("persist cart").expect_err("must error");
    assert_eq!(err.context, "persist cart");
    assert_eq!(err.source, "disk full");
    assert_eq!(err.to_string(), "persist cart: disk full");
}

#[test]
fn machine_error_serializes_details_in_key_order() {
    let err = MachineError::new("validation", "unknown sort key")
        .with_detail("value", "cheapest")
        .with_detail("field", "sort");
    let text = err.to_json_line();
    assert!(!text.contains('\n'));
    assert_eq!(
        text,
        r#"{"code":"validation","message":"unknown sort key","details":{"field":"sort","value":"cheapest"}}"#
    );
}

#[test]
fn exit_codes_map_to_process_status() {
    assert_eq!(ExitCode::Success.code(), 0);
    assert_eq!(ExitCode::Validation.code(), 3);
    assert_eq!(ExitCode::DependencyFailure.code(), 4);
    assert_eq!(ExitCode::Usage.code(), 2);
    assert_eq!(ExitCode::Internal.code(), 10);
    let _status: std::process::ExitCode = ExitCode::Usage.into();
}
