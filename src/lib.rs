// Configuration
pub mod config;

// Core game logic modules
pub mod core;

// Services (business logic)
pub mod services;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Application state
pub mod state;
