pub mod errors;
pub mod guard;
pub mod handler;
pub mod storage;
pub mod types;

pub use errors::SessionError;
pub use guard::{AuthResult, LogNavigator, Navigator, SessionGuard};
pub use handler::{login, logout, whoami};
pub use storage::{ClientStorage, FileStorage, MemoryStorage};
pub use types::{Credential, Identity, Role};
