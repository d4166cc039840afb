//! Synchronous client for the CompTox chemical-toxicology REST service.
//!
//! # Overview
//! `ApiClient` is the single request adapter: it joins the service root with
//! a resource path, injects the `x-api-key` header, sends the request through
//! a `Transport` and returns the parsed JSON document unmodified. Resource
//! groups (`ChemSearch`, `FunctionalUse`, `Product`, `Httk`, `Hazard`,
//! `Fate`) are thin borrowed views over it.
//!
//! # Design
//! - `Config` is an explicit immutable value, not a global.
//! - Each call is split into `build_*` (plain-data `HttpRequest`) and
//!   `parse_response`, so request shaping is testable without I/O.
//! - Resource operations are `Endpoint` table entries; validation runs while
//!   shaping, before the transport is touched.
//! - `types` offers typed records for callers who want them.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use resources::chemical::{ChemSearch, SearchQuery};
pub use resources::exposure::{FunctionalUse, FunctionalUseKind, Httk, Product, ProductDataKind};
pub use resources::fate::Fate;
pub use resources::hazard::{Hazard, HazardKind};
pub use resources::Endpoint;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::decode;
