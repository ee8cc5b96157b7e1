// Application layer - Dataset preparation and chart/tab state
pub mod chart_loader;
pub mod heating_service;
pub mod palette;
pub mod sensor_repository;
pub mod shortlist;
pub mod tabs;
pub mod view_registry;
