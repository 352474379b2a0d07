pub use ISelfAccount::{
    ISelfAccountErrors as SelfAccountError, ISelfAccountEvents as SelfAccountEvent,
};

alloy_sol_types::sol! {
    /// Recoverable smart-account implementation adopted by an externally
    /// owned address through one-shot delegation.
    ///
    /// The account is initialized exactly once, binding the proof scope and
    /// the associated recovery wrapper. Recovery cycles through
    /// `enableRecoveryMode` (opens the window), an out-of-band proof that
    /// installs a signer on the wrapper, `recover` calls by that signer, and
    /// `finishRecoveryMode` (closes the window without invalidating the
    /// signer).
    #[derive(Debug, PartialEq, Eq)]
    interface ISelfAccount {
        /// Bind the proof scope and mark the account initialized.
        /// Rejected once initialized; the delegation that installs this code
        /// is consumed on first use, so callers must check `isInitialized`
        /// before submitting.
        function initialize(uint256 scope, bool isProduction) external;

        /// Whether `initialize` has run.
        function isInitialized() external view returns (bool);

        /// Scope identifier bound at initialization; immutable afterwards.
        function scope() external view returns (uint256);

        /// The recovery wrapper associated at initialization.
        function wrapper() external view returns (address);

        /// Whether a recovery window is currently open.
        function isRecoveryModeEnabled() external view returns (bool);

        /// Open a recovery window. Callable by the account itself; resets
        /// any signer bound in a previous window.
        function enableRecoveryMode() external;

        /// Close the recovery window. Requires a bound signer and does not
        /// invalidate it; only the next `enableRecoveryMode` does.
        function finishRecoveryMode() external;

        /// Execute a value/data transfer as the account. Only the signer
        /// currently bound on the wrapper may call this; the caller is
        /// re-checked on every invocation.
        function recover(address to, uint256 value, bytes calldata data) external;

        // Events
        event AccountInitialized(uint256 indexed scope, address indexed wrapper);
        event RecoveryModeEnabled();
        event RecoveryModeFinished();
        event Recovered(address indexed to, uint256 value);

        // Errors
        error AlreadyInitialized();
        error NotInitialized();
        error RecoveryModeAlreadyEnabled();
        error RecoveryModeNotEnabled();
        error NoSignerBound();
        error NotAllowedSigner();
        error InsufficientBalance(uint256 requested, uint256 available);
        error UnauthorizedCaller();
    }
}
