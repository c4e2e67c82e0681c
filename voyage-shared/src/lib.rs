pub mod dates;
pub mod models;
pub mod pii;
pub mod response;

pub use models::{Client, ClientDraft, ClientPatch, Role, User, UserDraft, UserPatch};
pub use pii::Masked;
pub use response::ApiResponse;
