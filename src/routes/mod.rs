pub mod api;
pub mod filaments;
pub mod health;
pub mod locations;
pub mod printers;
pub mod proxy;
