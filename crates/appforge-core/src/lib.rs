//! Appforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Appforge, the
//! tool that turns a generic template repository into a named project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          appforge-cli (CLI)             │
//! │   (prompts, config, output, exit codes) │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (CreateAppService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateFetcher, Marker)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    appforge-adapters (Infrastructure)   │
//! │  (LocalFilesystem, GitFetcher, etc)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appforge_core::prelude::*;
//!
//! let app = AppDescriptor::builder()
//!     .description("MyAppTest description")
//!     .author("Firstname Lastname")
//!     .keywords("myapp test")
//!     .version("1.2.3")
//!     .github_url("https://github.com/author/myapp")
//!     .destination("./myapp")
//!     .build()?;
//!
//! let service = CreateAppService::new(TemplateProfile::default(), fetcher, filesystem, marker);
//! let report = service.create(&app)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreateAppService, LineEditor,
        ports::{DirEntry, ExecutableMarker, Filesystem, TemplateFetcher},
    };
    pub use crate::domain::{
        AppDescriptor, CreationReport, ReplacementRule, TemplateProfile, check_name,
        check_semantic_version,
    };
    pub use crate::error::{AppforgeError, AppforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
