//! Submitted form bodies. Missing fields deserialize as empty strings so
//! they fail validation like blank ones, instead of being rejected by the
//! extractor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommentForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub body: String,
}

impl CommentForm {
    /// Strip surrounding whitespace from every field.
    pub fn trimmed(self) -> Self {
        Self {
            user_name: self.user_name.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestForm {
    #[serde(default)]
    pub suggest: String,
}

impl SuggestForm {
    pub fn trimmed(self) -> Self {
        Self {
            suggest: self.suggest.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search_for: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_comment_fields() {
        let form = CommentForm {
            user_name: "  ann ".into(),
            body: "\n hello \t".into(),
        }
        .trimmed();
        assert_eq!(form.user_name, "ann");
        assert_eq!(form.body, "hello");
    }

    #[test]
    fn whitespace_suggestion_becomes_empty() {
        let form = SuggestForm {
            suggest: "   ".into(),
        }
        .trimmed();
        assert!(form.suggest.is_empty());
    }
}
