pub mod config;
pub mod defaults;
pub mod installation;

pub use config::{Config, ConfigStore};
pub use defaults::Defaults;
pub use installation::Installation;
