pub use IRecoveryRegistry::{
    IRecoveryRegistryErrors as RecoveryRegistryError,
    IRecoveryRegistryEvents as RecoveryRegistryEvent,
};

alloy_sol_types::sol! {
    /// Legacy recovery registry: an explicit fallback-address binding backed
    /// by an ECDSA signature instead of a credential proof.
    ///
    /// Kept as an alternate backend; a deployment uses either this registry
    /// or the wrapper-based flow, never both.
    #[derive(Debug, PartialEq, Eq)]
    interface IRecoveryRegistry {
        /// Bind a fallback address for the sender. `signature` must be the
        /// sender's EIP-191 personal-sign signature over
        /// `keccak256(abi.encodePacked(recoveryAddress))`.
        function registerRecovery(address recoveryAddress, bytes calldata signature) external;

        /// Clear the sender's fallback address. `signature` must be the
        /// sender's EIP-191 personal-sign signature over
        /// `keccak256(abi.encodePacked(sender))`. Fails when nothing is set.
        function cleanupRecovery(bytes calldata signature) external;

        /// Fallback address for a user; zero when unset.
        function getRecoveryAddress(address user) external view returns (address);

        // Events
        event RecoveryRegistered(address indexed user, address indexed recoveryAddress);
        event RecoveryCleanedUp(address indexed user);

        // Errors
        error InvalidSignature();
        error ZeroAddress();
        error NoRecoveryAddressSet();
    }
}
