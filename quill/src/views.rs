use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use quill_core::HttpError;
use quill_data::{Article, Comment};
use quill_markup::MarkupOptions;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("detail.html", include_str!("../templates/detail.html")),
    ("suggest.html", include_str!("../templates/suggest.html")),
    ("thanks.html", include_str!("../templates/thanks.html")),
];

/// The compiled page templates. Built once at startup; HTML autoescaping is
/// on for every template.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<Html<String>, HttpError> {
        self.tera
            .render(template, context)
            .map(Html)
            .map_err(|err| HttpError::Internal(format!("rendering {template}: {err}")))
    }

    /// Render with a status other than 200, e.g. a form redisplayed with
    /// validation errors.
    pub fn render_with_status(
        &self,
        status: StatusCode,
        template: &str,
        context: &Context,
    ) -> Result<Response, HttpError> {
        Ok((status, self.render(template, context)?).into_response())
    }
}

/// An article as the templates see it: body already converted to HTML and
/// timestamps formatted.
#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub id: i64,
    pub title: String,
    pub html: String,
    pub summary: Option<String>,
    pub created: String,
    pub last_modified: String,
    pub views: u32,
    pub likes: u32,
    pub topped: bool,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl ArticleView {
    pub fn new(article: Article, options: &MarkupOptions) -> Self {
        Self {
            html: quill_markup::render(&article.body, options),
            created: format_time(&article.created_time),
            last_modified: format_time(&article.last_modified_time),
            id: article.id,
            title: article.title,
            summary: article.summary,
            views: article.views,
            likes: article.likes,
            topped: article.topped,
            category_id: article.category_id,
            category_name: article.category_name,
        }
    }

    /// List pages render every body with the listing options.
    pub fn listing(articles: Vec<Article>) -> Vec<Self> {
        let options = MarkupOptions::listing();
        articles
            .into_iter()
            .map(|article| Self::new(article, &options))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub user_name: String,
    pub html: String,
    pub created: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            html: quill_markup::render(&comment.body, &MarkupOptions::detail()),
            created: format_time(&comment.created_time),
            user_name: comment.user_name,
        }
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
