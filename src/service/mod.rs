//! Contact service subsystem
//!
//! Validation, uniqueness enforcement, predicate filtering and repository
//! orchestration on top of the index layer.

mod errors;
mod filter;
mod service;

pub use errors::{ServiceError, ServiceResult};
pub use filter::{DateComparison, DateFilter};
pub use service::ContactService;
