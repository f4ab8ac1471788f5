//! # agora_core
//!
//! Core domain logic for Agora: authentication, forum posts and comments,
//! and chat history, written against store traits so the same services run
//! over Postgres or in memory.

pub mod auth;
pub mod chat;
pub mod db;
pub mod forum;
pub mod memory;
pub mod migrate;
pub mod models;

use auth::store::{SessionStore, UserStore};
use chat::store::MessageStore;
use forum::store::{CommentStore, PostStore};

/// Everything a backing store must provide to run every Agora service.
pub trait Store: UserStore + SessionStore + PostStore + CommentStore + MessageStore {}

impl<T> Store for T where T: UserStore + SessionStore + PostStore + CommentStore + MessageStore {}

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
