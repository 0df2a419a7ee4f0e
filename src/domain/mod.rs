mod auth_token;
mod credentials;
mod identity;
mod note;
mod note_pool;

pub use auth_token::AuthToken;
pub use credentials::{Credentials, EMAIL_DOMAIN, PASSWORD_SUFFIX};
pub use identity::{DEFAULT_IDENTITY_LENGTH, generate_random_string};
pub use note::{NewNote, NoteId, NotePatch, NoteUpdate};
pub use note_pool::{NotePool, POOL_SIZE};
