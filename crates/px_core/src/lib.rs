pub mod conversation;
pub mod error;
pub mod models;
pub mod source;
pub mod types;

pub use conversation::{Conversation, Message, Role, ToolCall};
pub use error::{Error, Result, Stage};
pub use models::{StructuredModel, ToolSpec};
pub use source::{LiteratureSource, PubmedRecord};
pub use types::{Article, Data, FetchedArticle};
