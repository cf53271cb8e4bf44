//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use case "turn a template into a named project".

pub mod create_app_service;

pub use create_app_service::CreateAppService;
