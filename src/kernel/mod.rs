pub mod event;
pub mod intent;
pub mod reactor;
pub mod router;
pub mod session;
pub mod slots;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod transcript;
