//! Config command handlers.

use dboard_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}
