//! Domain models for the server.
//!
//! These are validated domain objects, separate from database row types.

pub mod media;
pub mod session;
pub mod store;
pub mod user;
pub mod website;

pub use media::{Media, MediaComponent};
pub use session::{ChatTurn, CurrentUser, keys as session_keys};
pub use store::Store;
pub use user::{AuthSource, User};
pub use website::{DEFAULT_STORE_ID, WebsiteDocument};
