pub mod document;
pub mod headless;

pub use document::{ChromeDocument, ChromeElement};
pub use headless::{ChromeLauncher, ChromeSession};
