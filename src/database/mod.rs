pub mod store;

pub use store::{MemorySettingsStore, PgSettingsStore, Settings, SettingsStore, StoreError};
