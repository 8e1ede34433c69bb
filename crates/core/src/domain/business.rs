// Business Domain Model

use serde::{Deserialize, Serialize};

/// Business ID (UUID v4)
pub type BusinessId = String;

/// Prefix identifying an argon2 PHC-format credential.
/// Anything else in the credential column is a legacy plaintext password.
pub const HASH_PREFIX: &str = "$argon2";

/// Business entity: one tenant owning one independent queue.
///
/// `current_serving`, `last_issued` and `active_count` are the queue
/// counters. `active_count` is a denormalized cache of the number of
/// waiting tickets; the repair use case recomputes it from ground truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub slug: String,
    pub name: String,

    /// Stored credential: argon2 hash, or legacy plaintext (back-compat).
    pub credential: Option<String>,

    /// None is treated as online (back-compat with rows created before
    /// the field existed).
    pub is_online: Option<bool>,

    pub current_serving: i64,
    pub last_issued: i64,
    pub active_count: i64,

    pub created_at: i64, // epoch ms
}

impl Business {
    /// Create a new business with zeroed counters.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique business ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected)
    /// * `slug` - URL-safe unique identifier
    /// * `name` - Display name
    /// * `credential` - Hashed password (hash before calling)
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        slug: impl Into<String>,
        name: impl Into<String>,
        credential: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            credential,
            is_online: Some(true),
            current_serving: 0,
            last_issued: 0,
            active_count: 0,
            created_at,
        }
    }

    /// Whether new tickets may be issued. Unset means online.
    pub fn is_open(&self) -> bool {
        self.is_online.unwrap_or(true)
    }

    /// Whether the stored credential is in hashed form.
    pub fn has_hashed_credential(&self) -> bool {
        matches!(&self.credential, Some(c) if c.starts_with(HASH_PREFIX))
    }

    /// Allocate the next ticket number, bumping `last_issued` and the
    /// waiting count. Returns the number to stamp on the new ticket.
    pub fn issue_number(&mut self) -> i64 {
        self.last_issued += 1;
        self.active_count += 1;
        self.last_issued
    }

    /// Call the next customer: bump `current_serving` and release one
    /// waiting slot (floored at 0). Returns the new serving number.
    /// Callers must check `current_serving <= last_issued` first.
    pub fn advance(&mut self) -> i64 {
        self.current_serving += 1;
        self.active_count = (self.active_count - 1).max(0);
        self.current_serving
    }

    /// Release one waiting slot without advancing (customer left).
    pub fn release_slot(&mut self) {
        self.active_count = (self.active_count - 1).max(0);
    }

    /// Flip the online flag. Returns the new state.
    pub fn toggle_online(&mut self) -> bool {
        let next = !self.is_open();
        self.is_online = Some(next);
        next
    }

    /// Zero all counters. Ticket cancellation is handled separately.
    pub fn reset_counters(&mut self) {
        self.current_serving = 0;
        self.last_issued = 0;
        self.active_count = 0;
    }
}

impl Business {
    /// Create a test business with deterministic ID and timestamp.
    ///
    /// **Note**: This method should only be used in tests. For production
    /// code, always inject ID and time via providers.
    pub fn new_test(slug: impl Into<String>, name: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let id = format!("biz-{}", counter);
        let created_at = (counter * 1000) as i64;

        Self::new(id, created_at, slug, name, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_number_is_sequential() {
        let mut b = Business::new_test("cafe", "Cafe");
        assert_eq!(b.issue_number(), 1);
        assert_eq!(b.issue_number(), 2);
        assert_eq!(b.issue_number(), 3);
        assert_eq!(b.last_issued, 3);
        assert_eq!(b.active_count, 3);
    }

    #[test]
    fn test_advance_floors_active_count() {
        let mut b = Business::new_test("cafe", "Cafe");
        assert_eq!(b.advance(), 1);
        assert_eq!(b.active_count, 0);
        assert_eq!(b.advance(), 2);
        assert_eq!(b.active_count, 0);
    }

    #[test]
    fn test_unset_online_flag_means_open() {
        let mut b = Business::new_test("cafe", "Cafe");
        b.is_online = None;
        assert!(b.is_open());
        assert!(!b.toggle_online());
        assert_eq!(b.is_online, Some(false));
    }

    #[test]
    fn test_credential_scheme_detection() {
        let mut b = Business::new_test("cafe", "Cafe");
        assert!(!b.has_hashed_credential());
        b.credential = Some("hunter2".to_string());
        assert!(!b.has_hashed_credential());
        b.credential = Some("$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string());
        assert!(b.has_hashed_credential());
    }
}
