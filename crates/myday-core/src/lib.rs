pub mod config;
pub mod controller;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;

pub use config::Config;
pub use controller::{
  AppState,
  Controller,
  Effects,
  Event,
  Focus,
  Host,
  ListTarget
};
pub use render::ViewModel;
pub use storage::{
  KeyValueStore,
  MemoryStore
};
