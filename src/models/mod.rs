pub mod filament;
pub mod location;
pub mod printer;
