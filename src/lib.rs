//! # dspace-rest - client for the DSpace REST API
//!
//! A blocking Rust client for the REST interface of a DSpace repository:
//! communities, collections, items, bitstreams, metadata and login sessions.
//!
//! ## Features
//!
//! - URI templates with percent-encoded path variables and optional query
//!   parameters that are left out when absent
//! - Session token kept by the client and sent on every call while logged in
//! - JSON or XML request entities, raw byte streams for bitstream content
//! - One error type for template, HTTP status, transport and encoding failures
//! - Pluggable [`Transport`], with a reqwest based default
//!
//! ## Basic Usage
//!
//! ```no_run
//! use dspace_rest::{Config, RequestOptions, RestClient, DEMO_BASE_URL};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new(Config::new(DEMO_BASE_URL)?)?;
//!
//!     assert_eq!(client.test()?, "REST api is running.");
//!
//!     let top = client.top_communities(&RequestOptions::new().limit(10))?;
//!     for community in top {
//!         println!("{:?} {:?}", community.id, community.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! ```no_run
//! use dspace_rest::{Community, Config, RequestOptions, RestClient, User};
//!
//! let client = RestClient::new(Config::new("https://demo.dspace.org/rest")?)?;
//! client.login(&User::new("admin@example.org", "password"))?;
//!
//! let created = client.create_community(&Community::named("Archives"), &RequestOptions::new())?;
//! println!("created {:?}", created.id);
//!
//! client.logout()?;
//! # Ok::<(), dspace_rest::RestError>(())
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod codec;
pub mod error;
pub mod models;
pub mod options;
pub mod resources;
pub mod rest;
pub mod session;
pub mod template;
pub mod transport;
pub mod upload;

// Re-export main types for convenience
pub use catalog::Endpoint;
pub use client::{Config, DEMO_BASE_URL};
pub use codec::{Entity, MediaType, Payload, ResponseKind, TEXT_PLAIN};
pub use error::{RestError, Result};
pub use models::{
    Bitstream, CheckSum, Collection, Community, Item, MetadataEntry, ResourcePolicy, Status, User,
};
pub use options::RequestOptions;
pub use rest::RestClient;
pub use session::{Session, TOKEN_HEADER};
pub use template::{PathVars, QueryArgs, QueryParams};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use upload::{BitstreamUpload, UploadProgressFn, UploadStream};
