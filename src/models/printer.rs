use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow, ToSchema)]
pub struct Printer {
    /// Server-assigned UUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Location name the printer is assigned to
    pub location: String,
    /// Printer IP address on the local network
    pub ip_address: String,
    /// Port of the printer's control websocket
    pub websocket_port: u16,
    /// Port of the printer's HTTP board interface
    pub http_port: u16,
    /// Port of the printer's MJPEG camera stream
    pub video_port: u16,
    /// Filament spool currently loaded, if any
    pub current_filament_id: Option<String>,
}

/// Request body shared by printer create and update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PrinterPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[validate(length(min = 1, max = 64))]
    pub ip_address: String,
    pub websocket_port: u16,
    pub http_port: u16,
    pub video_port: u16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadFilamentRequest {
    /// Spool to load; null unloads the current spool
    pub filament_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrinterStatus {
    pub online: bool,
}
