//! Owned resources, ownership scoping, and scoped persistence.
//!
//! Every record kind here (family members, events, forum posts) carries an
//! immutable owner attribute, and every read or write passes through a
//! [`Scope`] that folds the caller's authorization into the query itself.
//! A record outside the caller's scope does not exist as far as the
//! caller can tell.
//!
//! ## Resources
//!
//! - [`FamilyMember`] — Profile with an embedded, ordered photo album
//! - [`Event`] — Calendar entry
//! - [`ForumPost`] — Discussion post with embedded, ordered replies
//!
//! ## Authorization
//!
//! - [`Scope`] — The uniform ALLOW/DENY decision over ownership
mod event;
mod member;
mod post;
mod repository;
mod scope;

pub use event::*;
pub use member::*;
pub use post::*;
pub use repository::*;
pub use scope::*;
