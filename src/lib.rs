/*!
 * # mortydex
 *
 * A client library for browsing a public character catalog and editing debt
 * records on a finance backend.
 *
 * ## Features
 *
 * - Filtered character listings (status, gender, species, type)
 * - Concurrent first-episode enrichment that tolerates per-character failures
 * - Client-side name search over the fetched collection
 * - Last-request-wins listing sessions
 * - Compound-interest projection and a debt record editor
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `app_controller`: Builds clients and sessions from the configuration
 * - `credentials`: Bearer token sources handed to the HTTP client
 * - `clients`: Catalog and backend clients:
 *   - `clients::http`: Configured reqwest client
 *   - `clients::catalog`: Character catalog client
 *   - `clients::debt`: Debt record client
 *   - `clients::mock`: In-memory catalog
 * - `models`: Wire data shapes and filter state
 * - `listing`: Listing pipeline, search and session state
 * - `debt`: Projection and editor
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod clients;
pub mod credentials;
pub mod debt;
pub mod errors;
pub mod listing;
pub mod models;

pub use app_config::Config;
pub use app_controller::Controller;
pub use debt::{DebtEditor, projected_amount};
pub use errors::{AppError, ClientError, ConfigError, DebtError};
pub use listing::{
    CharacterPipeline, ListingOutcome, ListingSession, ListingState, PipelineOptions,
    RefreshOutcome, apply_search,
};
pub use models::{CharacterEntity, FilterState, Selector, SelectorKind};
