//! Box office bootstrap.
//!
//! Loads configuration, installs tracing, loads every store from the data
//! directory and logs an occupancy summary per room.

use std::process::ExitCode;

use box_office::adapters::CatalogLoader;
use box_office::application::{
    CatalogReader, CommitGate, OccupancyGrouping, RoomOccupancyHandler, RoomOccupancyQuery,
};
use box_office::config::AppConfig;
use box_office::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = telemetry::init(&config.logging) {
        eprintln!("Failed to initialize tracing: {}", e);
        return ExitCode::FAILURE;
    }

    let loader = CatalogLoader::new(&config.storage.data_dir, config.loyalty.rules());
    let (catalog, report) = match loader.load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            return ExitCode::FAILURE;
        }
    };
    if report.skipped_total() > 0 {
        tracing::warn!(skipped = report.skipped_total(), "Some records were skipped");
    }

    let gate = CommitGate::new();
    let reader = CatalogReader::new(
        catalog.movies.clone(),
        catalog.rooms.clone(),
        catalog.sessions.clone(),
        catalog.clients.clone(),
        catalog.tickets.clone(),
        gate.clone(),
    );
    let occupancy = RoomOccupancyHandler::new(
        catalog.rooms.clone(),
        catalog.movies.clone(),
        catalog.sessions.clone(),
        gate,
    );
    let rooms = match reader.rooms().await {
        Ok(rooms) => rooms,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list rooms");
            return ExitCode::FAILURE;
        }
    };
    for room in rooms {
        let query = RoomOccupancyQuery {
            room_id: room.id(),
            grouping: OccupancyGrouping::ByMovie,
        };
        match occupancy.handle(query).await {
            Ok(summary) => tracing::info!(
                room_id = %room.id(),
                capacity = room.total_seats(),
                sessions = summary.total.session_count,
                occupancy_percent = summary.total.occupancy_percent(),
                "Room occupancy"
            ),
            Err(e) => tracing::warn!(room_id = %room.id(), error = %e, "Occupancy unavailable"),
        }
    }

    ExitCode::SUCCESS
}
