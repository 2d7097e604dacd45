//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{PAGE_SIZE, Page};
pub use post::{Post, PostDraft, PostId};
