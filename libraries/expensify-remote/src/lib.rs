//! Expensify Remote Store
//!
//! Implementations of [`expensify_core::RemoteStore`].
//!
//! # Features
//!
//! - **REST client**: talks to a Firebase-compatible realtime database over
//!   its `.json` REST endpoints (`POST` push, `PATCH` update, `DELETE`,
//!   `GET` one-shot read)
//! - **Memory store**: in-process JSON tree with the same semantics, including
//!   chronologically sortable push keys, used for tests and offline runs
//!
//! # Example
//!
//! ```ignore
//! use expensify_core::{RemoteStore, SessionContext};
//! use expensify_remote::{RemoteConfig, RemoteStoreClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteConfig::with_token("https://my-app.firebaseio.com", "id-token");
//!     let client = RemoteStoreClient::new(config)?;
//!
//!     let session = SessionContext::new("uid-123")?;
//!     let snapshot = client.once(&session.expenses_path()).await?;
//!     println!("{} expenses", snapshot.num_children());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod memory;
mod push_id;
mod types;

// Re-export main types
pub use client::RemoteStoreClient;
pub use error::{RemoteClientError, Result};
pub use memory::MemoryRemoteStore;
pub use push_id::PushIdGenerator;
pub use types::{PushResponse, RemoteConfig};
