// Entity Models
//
// Each entity kind has three shapes:
// - Full record: client fields + server-assigned fields (id, timestamps, read flag)
// - Insertable ("New*"): only what a client may supply on create
// - Partial ("*Patch"): every insertable field optional, applied field-by-field
//
// Both input shapes are built from untyped JSON through `schema::FieldReader`,
// so a rejected input lists every violated field.

pub mod user;
pub mod property;
pub mod blog_post;
pub mod contact;

pub use user::{User, NewUser};
pub use property::{Property, NewProperty, PropertyPatch, PropertyType, ListingStatus};
pub use blog_post::{BlogPost, NewBlogPost, BlogPostPatch};
pub use contact::{ContactSubmission, NewContactSubmission};
