//! Content module - handles posts, their rendering, validation and search

pub mod collection;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod navigation;
pub mod post;
pub mod search;
pub mod validator;

pub use collection::{PostCollection, SortDirection};
pub use frontmatter::{FrontMatter, RawRecord};
pub use loader::{ContentEntry, ContentSource, FsContentSource};
pub use markdown::{MarkdownRenderer, RenderedDocument};
pub use navigation::MenuItem;
pub use post::{Post, PostRecord};
pub use search::SearchOptions;
pub use validator::{FieldIssue, ValidationError};
