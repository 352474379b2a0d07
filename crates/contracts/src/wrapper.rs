pub use IRecoveryWrapper::{
    IRecoveryWrapperErrors as RecoveryWrapperError, IRecoveryWrapperEvents as RecoveryWrapperEvent,
};

alloy_sol_types::sol! {
    /// Recovery wrapper paired 1:1 with a recoverable account.
    ///
    /// Holds the credential nullifier bound at enrollment and the signer
    /// authorized by the latest verified recovery proof. The verification
    /// hub is the only caller of `onVerificationSuccess`; the wrapper treats
    /// a valid proof as an opaque capability that unlocks one signer per
    /// recovery window.
    #[derive(Debug, PartialEq, Eq)]
    interface IRecoveryWrapper {
        /// The account this wrapper recovers.
        function account() external view returns (address);

        /// Signer authorized by the latest verified proof; zero until a
        /// proof has been accepted in the current recovery window.
        function allowedSigner() external view returns (address);

        /// Credential nullifier bound at enrollment; zero while unbound.
        function getMasterNullifier() external view returns (uint256);

        /// Verification-hub callback for a successfully verified proof.
        ///
        /// Outside a recovery window this enrolls the credential (binds the
        /// master nullifier, exactly once). Inside an open window it binds
        /// the signer encoded in `userData`, exactly once per window, and
        /// only for the enrolled nullifier.
        function onVerificationSuccess(uint256 nullifier, bytes calldata userData) external;

        // Events
        event IdentityBound(uint256 indexed nullifier);
        event SignerBound(address indexed signer, uint256 indexed nullifier);

        // Errors
        error OnlyVerificationHub();
        error ZeroNullifier();
        error IdentityAlreadyBound();
        error IdentityNotBound();
        error NullifierMismatch();
        error SignerAlreadyBound();
        error InvalidUserData();
    }
}
