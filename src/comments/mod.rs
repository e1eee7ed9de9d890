mod policy;
mod reply;
mod tree;

pub use policy::{permitted_actions, render_plan, CommentActions, RenderedComment, Viewer};
pub use reply::{ReplyBox, ReplyState};
pub use tree::{build_comment_tree, forest_len, CommentNode};
