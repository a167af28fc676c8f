//! Typed data access. Every function takes any `ConnectionTrait`, so the same call works
//! against the pool or inside an open transaction.

pub mod comment;
pub mod engagement;
pub mod member;
pub mod moderation;
pub mod recipe;
pub mod tag;

/// Zero-based page index for sea-orm's paginator.
pub(crate) fn page_index(page: u64) -> u64 {
    page.saturating_sub(1)
}
