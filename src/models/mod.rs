mod author;
mod comment;
mod post;

pub use author::*;
pub use comment::*;
pub use post::*;

pub type UserId = i64;
pub type PostId = i64;
pub type CommentId = i64;

pub const DATE_FORMAT: &str = "%B %-d, %Y";

/// Renders an API timestamp as a calendar date, falling back to the raw value.
pub fn format_date(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date
            .with_timezone(&chrono::Local)
            .format(DATE_FORMAT)
            .to_string(),
        Err(_) => match chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") {
            Ok(date) => date.format(DATE_FORMAT).to_string(),
            Err(_) => timestamp.to_string(),
        },
    }
}
