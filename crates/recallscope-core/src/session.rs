//! Request correlation for out-of-order backend responses
//!
//! A fast sequence of filter toggles can produce responses arriving out of
//! order. Each outgoing request takes a token from a [`RequestSequencer`];
//! when its response arrives the caller offers the token back, and the
//! sequencer admits it only if no newer token has been admitted already.
//! Stale responses are dropped instead of overwriting fresher state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque, monotonically increasing identity of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Issues tokens and arbitrates which responses are still current.
///
/// Lock-free; safe to share across tasks with an `Arc`.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    admitted: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a token for a request about to be issued.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Offer a response's token back. Returns `true` if the response is
    /// current and its result should be applied, `false` if a newer
    /// response has already been admitted.
    pub fn admit(&self, token: RequestToken) -> bool {
        let mut current = self.admitted.load(Ordering::SeqCst);
        loop {
            if token.0 <= current {
                return false;
            }
            match self.admitted.compare_exchange(
                current,
                token.0,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}
