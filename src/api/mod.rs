//! API layer
//!
//! `InferenceService` holds the knowledge store, the session registry and
//! the metrics; HTTP routes and the line protocol are thin adapters over
//! it.
//!
//! # Supported Operations
//!
//! - start (by project or with inline rules)
//! - answer
//! - snapshot / end
//! - walk (automaton walk of one rule)

mod errors;
mod handler;
mod request;
mod response;
mod service;

pub use errors::{ApiError, ApiResult};
pub use handler::ApiHandler;
pub use request::{parse_session_id, AnswerRequest, Request, RuleSource, StartRequest, WalkRequest};
pub use response::{ErrorResponse, Response, StepResponse, SuccessResponse, WalkResponse};
pub use service::{InferenceService, ServiceOptions};
