// Configuration - typed settings store

pub mod settings;

pub use settings::Settings;
