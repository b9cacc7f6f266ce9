// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_empty_command_is_rejected() {
    let launcher = ProcessLauncher;
    let result = launcher.launch("   ");
    assert!(matches!(result, Err(crate::Error::LaunchFailed { .. })));
}

#[rstest]
fn test_missing_program_is_reported() {
    let launcher = ProcessLauncher;
    let result = launcher.launch("cpenv-no-such-program-on-path --flag");
    match result {
        Err(crate::Error::LaunchFailed { command, .. }) => {
            assert_eq!(command, "cpenv-no-such-program-on-path --flag");
        }
        other => panic!("Expected LaunchFailed, got: {:?}", other),
    }
}

#[cfg(unix)]
#[rstest]
fn test_exit_status_passthrough() {
    let launcher = ProcessLauncher;
    let status = launcher.launch("true").unwrap();
    assert_eq!(status, 0);

    let status = launcher.launch("false").unwrap();
    assert_eq!(status, 1);
}
