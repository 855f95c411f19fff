//! Farm Command Pipeline
//!
//! Every farm API operation is a row in a static command table. One generic
//! [`Pipeline`] runs any of them in four stages:
//!
//! 1. [`binding`]: raw caller input becomes an [`InvocationContext`]
//! 2. [`request`]: the context becomes a request object holding exactly the
//!    supplied parameters
//! 3. [`dispatch`]: one remote call through a lazily created shared client,
//!    with failures sorted into [`InvocationError`]
//! 4. [`projection`]: the response is narrowed to what the caller selected
//!
//! # Example
//!
//! ```no_run
//! use farm_client::{ClientConfig, Credentials};
//! use farm_command::{CommandRegistry, Invocation, Pipeline, SharedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SharedClient::http(
//!         ClientConfig::new("http://localhost:8080", "us-west-2"),
//!         Credentials::anonymous(),
//!     );
//!     let pipeline = Pipeline::new(CommandRegistry::builtin()?, client);
//!
//!     let outcome = pipeline
//!         .invoke(Invocation::new("ListFleets").arg("FarmId", "farm-123"))
//!         .await?;
//!
//!     println!("{}", outcome.value);
//!     Ok(())
//! }
//! ```

pub mod binding;
pub mod cancel;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod registry;
pub mod request;

#[cfg(test)]
mod testing;

pub use binding::{BindOptions, Bound, RawValue, bind};
pub use cancel::CancelSignal;
pub use context::InvocationContext;
pub use dispatch::{ClientFactory, SharedClient, dispatch};
pub use error::{BindingError, BindingWarning, DefinitionError, InvocationError, ProjectionError};
pub use pipeline::{Invocation, InvocationState, Outcome, Pipeline, Prepared};
pub use projection::Projection;
pub use registry::CommandRegistry;
pub use request::build_request;
