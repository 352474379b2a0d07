//! Scope derivation.
//!
//! A scope binds a proof request to one specific contract endpoint and
//! application context. It is derived by packing the normalized endpoint
//! string into 31-byte chunks, hashing the chunks with a variable-arity
//! Poseidon instance over BN254 (circom parameterization), and combining the
//! result with the packed scope seed through a 2-ary Poseidon. Any party that
//! needs to generate or verify a proof request against a given account must
//! reproduce this value bit-for-bit.

use alloy_primitives::U256;
use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonError, PoseidonHasher};

/// Maximum length of a single packed chunk in bytes.
const CHUNK_BYTES: usize = 31;

/// Maximum number of endpoint chunks, i.e. 496 characters.
const MAX_CHUNKS: usize = 16;

/// Largest input count covered by the circom BN254 parameter set shipped
/// with `light-poseidon` (widths 2..=13).
const MAX_POSEIDON_ARITY: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("input must contain only ASCII characters")]
    NonAscii,
    #[error("endpoint must be less than {} characters", CHUNK_BYTES * MAX_CHUNKS + 1)]
    EndpointTooLong,
    #[error("packed value exceeds the maximum size of 31 bytes")]
    ChunkOverflow,
    #[error("endpoint is empty")]
    EmptyEndpoint,
    #[error("unsupported poseidon arity: {0}")]
    UnsupportedArity(usize),
    #[error(transparent)]
    Poseidon(#[from] PoseidonError),
}

/// Normalizes an endpoint to its bare host/address string by stripping any
/// URL scheme and path suffix.
pub fn format_endpoint(endpoint: &str) -> &str {
    let stripped = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    stripped.split('/').next().unwrap_or("")
}

/// Packs an ASCII string big-endian into an integer, one byte per 8-bit
/// shift. Rejects non-ASCII input and values above 2^248 - 1 (31 bytes).
pub fn pack_ascii(s: &str) -> Result<U256, ScopeError> {
    if !s.is_ascii() {
        return Err(ScopeError::NonAscii);
    }
    if s.len() > CHUNK_BYTES {
        return Err(ScopeError::ChunkOverflow);
    }
    let mut packed = U256::ZERO;
    for byte in s.bytes() {
        packed = (packed << 8) | U256::from(byte);
    }
    Ok(packed)
}

/// Derives the scope identifier for an endpoint and a scope seed.
pub fn hash_endpoint_with_scope(endpoint: &str, seed: &str) -> Result<U256, ScopeError> {
    let formatted = format_endpoint(endpoint);
    if !formatted.is_ascii() {
        return Err(ScopeError::NonAscii);
    }
    if formatted.len() > CHUNK_BYTES * MAX_CHUNKS {
        return Err(ScopeError::EndpointTooLong);
    }
    if formatted.is_empty() {
        return Err(ScopeError::EmptyEndpoint);
    }

    let chunks = formatted
        .as_bytes()
        .chunks(CHUNK_BYTES)
        // chunk boundaries are byte-exact since the input is ASCII
        .map(|chunk| pack_ascii(std::str::from_utf8(chunk).expect("ascii slice")))
        .collect::<Result<Vec<_>, _>>()?;

    let endpoint_hash = poseidon_flexible(&chunks.iter().map(u256_to_fr).collect::<Vec<_>>())?;
    let scope_int = pack_ascii(seed)?;

    let combined = poseidon_flexible(&[endpoint_hash, u256_to_fr(&scope_int)])?;
    Ok(fr_to_u256(&combined))
}

/// Poseidon with arity selected by the input count, mirroring the proof
/// provider's flexible hasher. Arities outside the shipped circom parameter
/// set are rejected before parameter lookup.
fn poseidon_flexible(inputs: &[Fr]) -> Result<Fr, ScopeError> {
    if inputs.is_empty() || inputs.len() > MAX_POSEIDON_ARITY {
        return Err(ScopeError::UnsupportedArity(inputs.len()));
    }
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())?;
    Ok(hasher.hash(inputs)?)
}

fn u256_to_fr(value: &U256) -> Fr {
    Fr::from_be_bytes_mod_order(&value.to_be_bytes::<32>())
}

fn fr_to_u256(value: &Fr) -> U256 {
    U256::from_be_slice(&value.into_bigint().to_bytes_be())
}
