//! Flat-file JSON persistence for a small posting service.
//!
//! Posts and users live in one JSON document on disk. Every call reloads the
//! document, and writes rewrite it whole under a single lock, so ids come out
//! dense and in creation order even with concurrent callers.
//!
//! ```rust,no_run
//! use chirpy_store::Store;
//!
//! let store = Store::open("database.json").unwrap();
//! let post = store.posts().create("hello world".into()).unwrap();
//! assert_eq!(store.posts().get(post.id).unwrap(), post);
//! ```
//!
//! With the `server` feature (on by default) the [`server`] module wraps the
//! store in an HTTP API.
//!
//! **Single-process only.** If multiple processes open the same file they will
//! clobber each other.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod filter;
pub mod persist;
pub mod repo;
pub mod serializer;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

pub use document::{Document, Entity, Post, User};
pub use error::{Error, Result};
pub use filter::{ContentFilter, MAX_POST_LEN};
pub use repo::Repository;
pub use store::{Store, StoreBuilder};
