//! # Declarative REST resources
//!
//! Declare that a data model is backed by a REST resource and get its request
//! methods generated: fetch one, fetch many, create, update and delete.
//!
//! ## Overview
//!
//! This crate provides:
//! - A declaration surface via the [`rest::RestModel`] trait, a per-field
//!   [`rest::ResourceSchema`] and one [`rest::Directive`] per verb
//! - Build-time validation of URL templates and path parameters
//!   ([`BuildError`])
//! - Request and response body shapes with field exclusion and key renaming
//! - A response envelope resolver that finds the payload whether it is bare,
//!   a bare array, or wrapped under `data`, `result` or any other key
//! - An async HTTP client with explicit request defaults ([`RequestConfig`]),
//!   a pluggable [`clients::Transport`] and an optional
//!   [`auth::AuthorizationProvider`]
//!
//! ## Quick Start
//!
//! ```rust
//! use declarative_rest::rest::{
//!     Directive, FieldDescriptor, FieldType, ResourceDefinition, ResourceSchema, Verb,
//! };
//!
//! let schema = ResourceSchema::new("User")
//!     .field(FieldDescriptor::new("id", FieldType::Integer).excluded())
//!     .field(FieldDescriptor::new("name", FieldType::String).wire_key("name_value"));
//!
//! let definition = ResourceDefinition::build(
//!     schema,
//!     &[
//!         Directive::get_one("https://api.example.com/users/:id"),
//!         Directive::create("https://api.example.com/users"),
//!     ],
//! )
//! .unwrap();
//!
//! let create = definition.method(Verb::Create).unwrap();
//! assert!(!create.request_body().unwrap().contains_property("id"));
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use declarative_rest::{HttpClient, RequestConfig, RequestOverrides};
//! use declarative_rest::auth::StaticAuthorization;
//! use declarative_rest::rest::RestModel;
//!
//! let client = HttpClient::builder()
//!     .config(RequestConfig::json())
//!     .authorization(StaticAuthorization::bearer("token"))
//!     .build()?;
//!
//! let user = User::get_one(&client, &["42"], None).await?;
//! user.update(&client, Some(RequestOverrides::new().header("If-Match", "v3"))).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: request defaults are passed explicitly to the client
//! - **Fail-fast validation**: declarations are validated as a whole before any request
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{KeyValue, RequestConfig, RequestConfigBuilder};
pub use error::BuildError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpClientBuilder, HttpError, HttpMethod, HttpResponse, HttpStatusError,
    InvalidHttpRequestError, InvalidResponseError, RequestOverrides, TransportError,
};

// Re-export resource types
pub use rest::{ResourceError, ResourceResponse, RestModel};
