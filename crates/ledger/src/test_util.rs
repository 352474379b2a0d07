//! Assertion helpers shared by unit and integration tests.

use std::fmt;

use alloy_sol_types::SolInterface;

use crate::error::LedgerError;

/// Asserts that `result` is a contract revert carrying exactly `expected`.
#[track_caller]
pub fn assert_reverts_with<T, E>(result: Result<T, LedgerError>, expected: E)
where
    T: fmt::Debug,
    E: SolInterface + fmt::Debug,
{
    match result {
        Ok(value) => panic!("expected revert {expected:?}, got Ok({value:?})"),
        Err(err) => {
            let Some(data) = err.revert_data() else {
                panic!("expected revert {expected:?}, got non-revert error: {err}");
            };
            assert_eq!(
                data.as_ref(),
                expected.abi_encode().as_slice(),
                "reverted with a different error than {expected:?}"
            );
        }
    }
}
