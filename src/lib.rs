pub mod config;
pub mod faq;
pub mod kernel;

// Re-export the entry points for convenient access
pub use config::{BotConfig, Preset};
pub use kernel::reactor::Reactor;
pub use kernel::router::DialogueRouter;
pub use kernel::session::Session;
