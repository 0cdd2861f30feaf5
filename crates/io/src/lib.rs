// File I/O operations

pub mod paths;
pub mod settings_cfg;
