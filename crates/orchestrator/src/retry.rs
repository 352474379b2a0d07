//! Retry for transient JSON-RPC read failures.
//!
//! Only backend reads go through [`with_retry`]; transaction submission is
//! never replayed. Failures are classified on alloy's typed transport error
//! rather than on rendered messages, so a revert or a malformed request
//! surfaces immediately while rate limiting and upstream hiccups back off.

use alloy::transports::{RpcError, TransportError, TransportErrorKind};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};

/// First backoff step. Reads are cheap and polled on a short cycle, so the
/// ladder starts well under a block time.
const INITIAL_BACKOFF_MS: u64 = 250;
const MAX_BACKOFF_MS: u64 = 4_000;
const MAX_RETRIES: usize = 4;

/// Whether the failed request may succeed on a replay.
///
/// Anything that is not a [`TransportError`] came from above the transport
/// (decoding, orchestration state) and is final.
fn is_transient(err: &eyre::Report) -> bool {
    let Some(rpc_err) = err.downcast_ref::<TransportError>() else {
        return false;
    };
    match rpc_err {
        RpcError::Transport(kind) => match kind {
            TransportErrorKind::HttpError(http) => {
                http.is_rate_limit_err()
                    || http.is_temporarily_unavailable()
                    || matches!(http.status, 408 | 502 | 504)
            }
            TransportErrorKind::MissingBatchResponse(_) => true,
            _ => false,
        },
        // provider-specific rate-limit codes (429, -32005, ...)
        RpcError::ErrorResp(payload) => payload.is_retry_err(),
        RpcError::NullResp => true,
        _ => false,
    }
}

fn backoff(attempt: usize) -> Duration {
    let step = INITIAL_BACKOFF_MS.saturating_mul(1 << attempt.min(8));
    let capped = step.min(MAX_BACKOFF_MS);
    let jitter = rand::thread_rng().gen_range(0..=capped / 4);
    Duration::from_millis(capped + jitter)
}

pub async fn with_retry<F, Fut, T>(operation_name: &str, mut f: F) -> eyre::Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = eyre::Result<T>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                if !is_transient(&err) {
                    debug!(
                        operation = %operation_name,
                        error = %err,
                        "permanent error, not retrying"
                    );
                    return Err(err);
                }

                if attempt >= MAX_RETRIES {
                    warn!(
                        operation = %operation_name,
                        attempts = %attempt,
                        error = %err,
                        "retries exhausted"
                    );
                    return Err(err);
                }

                let delay = backoff(attempt);
                warn!(
                    operation = %operation_name,
                    attempt = %(attempt + 1),
                    delay_ms = %delay.as_millis(),
                    error = %err,
                    "transient transport error, backing off"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::transports::HttpError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rate_limited() -> eyre::Report {
        let err: TransportError = RpcError::Transport(TransportErrorKind::HttpError(HttpError {
            status: 429,
            body: String::new(),
        }));
        err.into()
    }

    #[tokio::test]
    async fn non_transport_errors_fail_immediately() {
        let calls = AtomicUsize::new(0);
        let result: eyre::Result<()> = with_retry("op", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(eyre::eyre!("execution reverted"))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn client_side_transport_errors_fail_immediately() {
        let calls = AtomicUsize::new(0);
        let result: eyre::Result<()> = with_retry("op", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            let err: TransportError =
                RpcError::Transport(TransportErrorKind::HttpError(HttpError {
                    status: 400,
                    body: String::new(),
                }));
            Err(err.into())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limited_reads_are_retried() {
        let calls = AtomicUsize::new(0);
        let result = with_retry("op", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(rate_limited())
            } else {
                Ok(7u64)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_last_error() {
        let calls = AtomicUsize::new(0);
        let result: eyre::Result<()> = with_retry("op", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(rate_limited())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRIES + 1);
    }
}
