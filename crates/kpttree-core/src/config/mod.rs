//! Configuration management.
//!
//! User preferences ([`settings::Config`]) and colours ([`theme::Theme`])
//! are read from a TOML file at startup.

pub mod settings;
pub mod theme;
