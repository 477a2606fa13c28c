// Estate Catalog - Core Library
// Exposes the catalog model, storage engine and REST API for the server binary and tests

pub mod schema;
pub mod entities;
pub mod error;
pub mod storage;
pub mod seed;
pub mod config;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod logging;

// Re-export commonly used types
pub use schema::{FieldError, FieldReader, ValidationErrors};
pub use entities::{
    User, NewUser,
    Property, NewProperty, PropertyPatch, PropertyType, ListingStatus,
    BlogPost, NewBlogPost, BlogPostPatch,
    ContactSubmission, NewContactSubmission,
};
pub use error::{ConfigError, StoreError, StoreResult};
pub use storage::{
    Storage, MemStorage, RecordCounts,
    DEFAULT_FEATURED_PROPERTIES, DEFAULT_FEATURED_BLOG_POSTS,
};
pub use config::{Settings, ServerSettings, CatalogSettings, LogSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
