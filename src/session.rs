//  _  __           ____            __ _
// | |/ /___ _   _ / ___|_ __ __ _ / _| |_
// | ' // _ \ | | | |   | '__/ _` | |_| __|
// | . \  __/ |_| | |___| | | (_| |  _| |_
// |_|\_\___|\__, |\____|_|  \__,_|_|  \__|
//           |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Latest-request guard for overlapping generations

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Id handed to a generation when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Keeps the displayed value in step with the most recent request.
///
/// Every generation takes a ticket with [`GenerationTracker::begin`] and
/// hands its result back through [`GenerationTracker::publish`]. Results
/// whose ticket is no longer the latest are dropped, so a slow earlier
/// request cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    latest: AtomicU64,
    current: Mutex<Option<String>>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is still the latest. Returns whether it
    /// was kept.
    pub fn publish(&self, ticket: Ticket, value: String) -> bool {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // 持锁后再比较，避免与更新的结果交错
        if !self.is_latest(ticket) {
            log::debug!("Discarding stale result for request {}", ticket.0);
            return false;
        }
        *current = Some(value);
        true
    }

    pub fn current(&self) -> Option<String> {
        match self.current.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
