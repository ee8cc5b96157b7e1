// Infrastructure layer - External dependencies and adapters
pub mod chartjs;
pub mod config;
pub mod snapshot_repository;
