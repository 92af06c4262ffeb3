//! Core domain entities.
//!
//! The service has a single entity, [`ShortLink`], plus the [`NewShortLink`]
//! insert request that storage turns into a persisted record.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
