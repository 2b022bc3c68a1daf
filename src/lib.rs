// src/lib.rs
//! notion-cli library: a small command-line client for the Notion API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `Verb`, `Command`
//! - **Credentials**: `CredentialSources`, `Credentials`
//! - **Domain types**: `NotionId`, `ApiKey`, `PropertyType`, `Block`
//! - **API**: `NotionTransport`, `HttpTransport`, `NotionApi`
//! - **Formatting**: property codec, block renderer, section layouts
//! - **Dispatch**: `Dispatcher`, `CommandOutput`

pub mod api;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod formatting;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, TypeContext};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, Verb};
pub use crate::credentials::{CredentialSource, CredentialSources, Credentials};

// --- Domain Types ---
pub use crate::model::{Block, BlockKind, FormulaKind, ImageSource, PropertyType, RollupKind};
pub use crate::types::{ApiKey, NotionId};

// --- API ---
pub use crate::api::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, NotionApi, NotionTransport,
};

// --- Formatting ---
pub use crate::formatting::{
    build_property_write, build_update_payload, project_property, render_blocks, render_outline,
    render_property_value, DisplayValue,
};

// --- Dispatch ---
pub use crate::dispatcher::{CommandOutput, Dispatcher, SectionFailure};
