pub mod navigation;
pub mod listing;
pub mod window;
pub mod session;
pub mod keys;
pub mod loader;

pub use navigation::*;
pub use listing::*;
pub use window::*;
pub use session::*;
pub use keys::*;
pub use loader::*;
