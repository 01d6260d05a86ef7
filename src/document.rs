//! Entities and the on-disk document that holds them.
//!
//! The whole database is one JSON object with a mapping per entity kind, keyed
//! by the entity's own id:
//!
//! ```json
//! {"posts": {"1": {"id": 1, "body": "hello world"}}, "users": {"1": {"id": 1, "email": "a@b.com"}}}
//! ```
//!
//! Unknown fields are ignored and missing ones default, so older files keep
//! loading as the entities grow.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A short text post. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned id, starting at 1.
    pub id: u64,
    /// Filtered text, at most [`MAX_POST_LEN`](crate::filter::MAX_POST_LEN) characters.
    #[serde(default)]
    pub body: String,
}

/// A registered user. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned id, starting at 1.
    pub id: u64,
    /// Not checked for format or uniqueness.
    #[serde(default)]
    pub email: String,
}

/// The full contents of the backing file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Posts by id. Older files call this `chirps`.
    #[serde(default, alias = "chirps")]
    pub posts: HashMap<u64, Post>,
    /// Users by id.
    #[serde(default)]
    pub users: HashMap<u64, User>,
}

impl Document {
    /// `true` when neither mapping holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.users.is_empty()
    }

    /// Every key must match the id stored under it.
    pub fn check(&self) -> Result<()> {
        check_table::<Post>(self)?;
        check_table::<User>(self)
    }
}

fn check_table<E: Entity>(doc: &Document) -> Result<()> {
    match E::table(doc).iter().find(|(key, entity)| **key != entity.id()) {
        Some((key, entity)) => Err(Error::Corrupt(format!(
            "{} stored under key {key} has id {}",
            E::KIND,
            entity.id()
        ))),
        None => Ok(()),
    }
}

/// Ties an entity type to its mapping inside a [`Document`].
///
/// Implemented for [`Post`] and [`User`]; [`Repository`](crate::repo::Repository)
/// is generic over it.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// What a caller supplies to create one (everything except the id).
    type Draft;

    /// Lowercase name used in errors and logs.
    const KIND: &'static str;

    /// Assemble a new entity from its assigned id.
    fn build(id: u64, draft: Self::Draft) -> Self;

    /// The entity's id.
    fn id(&self) -> u64;

    /// The mapping this kind lives in.
    fn table(doc: &Document) -> &HashMap<u64, Self>;

    /// Mutable access to the mapping this kind lives in.
    fn table_mut(doc: &mut Document) -> &mut HashMap<u64, Self>;
}

impl Entity for Post {
    type Draft = String;

    const KIND: &'static str = "post";

    fn build(id: u64, body: String) -> Self {
        Post { id, body }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn table(doc: &Document) -> &HashMap<u64, Self> {
        &doc.posts
    }

    fn table_mut(doc: &mut Document) -> &mut HashMap<u64, Self> {
        &mut doc.posts
    }
}

impl Entity for User {
    type Draft = String;

    const KIND: &'static str = "user";

    fn build(id: u64, email: String) -> Self {
        User { id, email }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn table(doc: &Document) -> &HashMap<u64, Self> {
        &doc.users
    }

    fn table_mut(doc: &mut Document) -> &mut HashMap<u64, Self> {
        &mut doc.users
    }
}
