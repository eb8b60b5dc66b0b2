pub mod logging;
pub mod menu;
pub mod prompt;
pub mod report;
pub mod session;
pub mod utils;

pub use prompt::{PromptError, Prompter};
pub use session::Session;
