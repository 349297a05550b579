// Handlers module
pub mod filaments;
pub mod frontend;
pub mod health;
pub mod locations;
pub mod printers;
pub mod proxy;
pub mod websocket;
