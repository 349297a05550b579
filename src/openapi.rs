use utoipa::OpenApi;

use crate::handlers::{filaments, health, locations, printers, proxy};
use crate::models::filament::{Filament, FilamentPayload};
use crate::models::location::CreateLocationRequest;
use crate::models::printer::{LoadFilamentRequest, Printer, PrinterPayload, PrinterStatus};

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "3D Print Farm Manager API",
        description = "Backend server to manage and proxy requests to Elegoo 3D printers."
    ),
    paths(
        // Health endpoints
        health::check,

        // Printer endpoints
        printers::list_printers,
        printers::create_printer,
        printers::update_printer,
        printers::delete_printer,
        printers::load_filament,
        printers::printer_status,

        // Location endpoints
        locations::list_locations,
        locations::create_location,
        locations::delete_location,

        // Filament endpoints
        filaments::list_filaments,
        filaments::create_filament,
        filaments::update_filament,
        filaments::delete_filament,

        // Proxy endpoints
        proxy::video_stream,
        proxy::history_image,
    ),
    components(
        schemas(
            // Health schemas
            health::HealthResponse,

            // Printer schemas
            Printer,
            PrinterPayload,
            LoadFilamentRequest,
            PrinterStatus,

            // Location schemas
            CreateLocationRequest,

            // Filament schemas
            Filament,
            FilamentPayload,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "printers", description = "Printer fleet management"),
        (name = "locations", description = "Printer location management"),
        (name = "filaments", description = "Filament spool inventory"),
        (name = "proxy", description = "Proxied printer resources"),
    )
)]
pub struct ApiDoc;
