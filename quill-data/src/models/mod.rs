mod article;
mod category;
mod comment;
mod suggestion;
mod tag;

pub use article::{Article, ArticleChanges, ArticleStatus, NewArticle};
pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use suggestion::{NewSuggestion, Suggestion, SUGGESTION_MAX_CHARS};
pub use tag::{NewTag, Tag};
