//! Stale-response guard.
//!
//! A view takes a `Ticket` before awaiting a request and applies the result
//! only while the ticket is still current. Starting a newer load, closing the
//! view or navigating away invalidates older tickets.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ViewGeneration(Arc<AtomicU64>);

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl ViewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load, superseding every earlier ticket.
    pub fn next_ticket(&self) -> Ticket {
        let issued = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation: self.0.clone(),
            issued,
        }
    }

    /// Joins the current load without superseding it.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.0.clone(),
            issued: self.0.load(Ordering::SeqCst),
        }
    }

    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }

    /// Passes `result` through while current. Covers both the state write and
    /// any error toast.
    pub fn accept<T>(&self, result: T) -> Option<T> {
        self.is_current().then_some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_load_supersedes_older() {
        let generation = ViewGeneration::new();
        let first = generation.next_ticket();
        let second = generation.next_ticket();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_invalidate_drops_results() {
        let generation = ViewGeneration::new();
        let ticket = generation.next_ticket();
        let joined = generation.ticket();
        assert!(joined.is_current());

        generation.invalidate();
        assert!(!ticket.is_current());
        assert!(!joined.is_current());
    }

    #[tokio::test]
    async fn test_late_response_is_ignored() {
        let generation = ViewGeneration::new();
        let mut applied = Vec::new();

        let ticket = generation.next_ticket();
        // View dismissed while the request is pending.
        generation.invalidate();
        let response = async { "page 1" }.await;
        if ticket.is_current() {
            applied.push(response);
        }

        assert!(applied.is_empty());
    }

    // =========================================================
    // Session-scoped loads
    // =========================================================

    #[tokio::test]
    async fn test_sign_out_drops_pending_favorites() {
        let generation = ViewGeneration::new();
        let ticket = generation.next_ticket();

        // Signed-out branch runs while the favorites request is in flight.
        generation.invalidate();
        let response: Result<Vec<&str>, &str> = async { Ok(vec!["ad-1"]) }.await;

        assert!(ticket.accept(response).is_none());
    }

    #[tokio::test]
    async fn test_error_after_navigation_is_not_reported() {
        let generation = ViewGeneration::new();
        let ticket = generation.next_ticket();

        // Page unmounted before the request failed.
        generation.invalidate();
        let response: Result<(), &str> = async { Err("offline") }.await;

        let mut toasts = Vec::new();
        if let Some(Err(err)) = ticket.accept(response) {
            toasts.push(err);
        }
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_each_effect_run_supersedes_previous() {
        let generation = ViewGeneration::new();
        let signed_in_as_a = generation.next_ticket();
        let signed_in_as_b = generation.next_ticket();

        assert_eq!(signed_in_as_a.accept(1), None);
        assert_eq!(signed_in_as_b.accept(2), Some(2));
    }
}
