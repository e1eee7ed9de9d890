mod buttons;
mod comment_tree;
mod navitems;
mod post_preview;

pub use buttons::ConfirmDelete;
pub use comment_tree::{CommentSection, CommentSubmit};
pub(crate) use navitems::NavItems;
pub use post_preview::PostPreviewList;
