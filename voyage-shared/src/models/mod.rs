pub mod client;
pub mod user;

pub use client::{Client, ClientDraft, ClientPatch};
pub use user::{Role, User, UserDraft, UserPatch};
