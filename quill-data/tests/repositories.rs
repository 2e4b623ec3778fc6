use quill_data::{
    ArticleChanges, ArticleRepository, ArticleStatus, CategoryRepository, CommentRepository,
    DataError, NewArticle, NewCategory, NewComment, NewSuggestion, NewTag, SuggestionRepository,
    TagRepository,
};
use sqlx::SqlitePool;

struct Repos {
    articles: ArticleRepository,
    categories: CategoryRepository,
    tags: TagRepository,
    comments: CommentRepository,
    suggestions: SuggestionRepository,
}

async fn setup() -> Repos {
    let pool: SqlitePool = quill_data::connect("sqlite::memory:", 1).await.unwrap();
    quill_data::migrate(&pool).await.unwrap();
    Repos {
        articles: ArticleRepository::new(pool.clone()),
        categories: CategoryRepository::new(pool.clone()),
        tags: TagRepository::new(pool.clone()),
        comments: CommentRepository::new(pool.clone()),
        suggestions: SuggestionRepository::new(pool),
    }
}

fn titles(articles: &[quill_data::Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}

fn comment(article_id: i64, user_name: &str, body: &str) -> NewComment {
    NewComment {
        article_id,
        user_name: user_name.into(),
        body: body.into(),
    }
}

// ── Listing ────────────────────────────────────────────────

#[tokio::test]
async fn list_published_skips_drafts_newest_first() {
    let r = setup().await;
    r.articles.create(NewArticle::published("First", "one")).await.unwrap();
    r.articles.create(NewArticle::draft("Hidden", "draft")).await.unwrap();
    r.articles.create(NewArticle::published("Second", "two")).await.unwrap();

    let listed = r.articles.list_published().await.unwrap();
    assert_eq!(titles(&listed), ["Second", "First"]);
}

#[tokio::test]
async fn updating_an_article_moves_it_to_the_top() {
    let r = setup().await;
    let first = r.articles.create(NewArticle::published("First", "one")).await.unwrap();
    r.articles.create(NewArticle::published("Second", "two")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = r
        .articles
        .update(first.id, ArticleChanges { body: Some("edited".into()), ..Default::default() })
        .await
        .unwrap();
    assert!(updated.last_modified_time > first.last_modified_time);
    assert_eq!(updated.created_time, first.created_time);

    let listed = r.articles.list_published().await.unwrap();
    assert_eq!(titles(&listed), ["First", "Second"]);
}

#[tokio::test]
async fn list_by_category_only_returns_published_members() {
    let r = setup().await;
    let tech = r.categories.create(NewCategory::new("Tech")).await.unwrap();
    let life = r.categories.create(NewCategory::new("Life")).await.unwrap();
    r.articles.create(NewArticle::published("A", "a").in_category(tech.id)).await.unwrap();
    r.articles.create(NewArticle::draft("B", "b").in_category(tech.id)).await.unwrap();
    r.articles.create(NewArticle::published("C", "c").in_category(life.id)).await.unwrap();

    let listed = r.articles.list_by_category(tech.id).await.unwrap();
    assert_eq!(titles(&listed), ["A"]);
    assert_eq!(listed[0].category_name.as_deref(), Some("Tech"));
}

#[tokio::test]
async fn list_by_unknown_category_is_not_found() {
    let r = setup().await;
    let err = r.articles.list_by_category(42).await.unwrap_err();
    assert!(matches!(err, DataError::NotFound(ref msg) if msg == "Category 42 not found"));
}

#[tokio::test]
async fn list_by_tag_filters_on_membership_and_status() {
    let r = setup().await;
    let rust = r.tags.create(NewTag::new("rust")).await.unwrap();
    let sql = r.tags.create(NewTag::new("sql")).await.unwrap();
    r.articles
        .create(NewArticle::published("Ownership", "...").with_tags([rust.id]))
        .await
        .unwrap();
    r.articles
        .create(NewArticle::published("Both", "...").with_tags([rust.id, sql.id]))
        .await
        .unwrap();
    r.articles
        .create(NewArticle::draft("Unfinished", "...").with_tags([rust.id]))
        .await
        .unwrap();

    assert_eq!(titles(&r.articles.list_by_tag(rust.id).await.unwrap()), ["Both", "Ownership"]);
    assert_eq!(titles(&r.articles.list_by_tag(sql.id).await.unwrap()), ["Both"]);
    assert!(r.articles.list_by_tag(999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn set_tags_replaces_the_tag_set() {
    let r = setup().await;
    let a = r.tags.create(NewTag::new("a")).await.unwrap();
    let b = r.tags.create(NewTag::new("b")).await.unwrap();
    let article = r
        .articles
        .create(NewArticle::published("Tagged", "...").with_tags([a.id]))
        .await
        .unwrap();

    r.articles.set_tags(article.id, &[b.id]).await.unwrap();
    let names: Vec<_> = r
        .articles
        .tags_of(article.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["b"]);

    let err = r.articles.set_tags(article.id, &[777]).await.unwrap_err();
    assert!(err.is_not_found());
}

// ── Search ─────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_titles_of_published_articles() {
    let r = setup().await;
    r.articles.create(NewArticle::published("Rust async", "x")).await.unwrap();
    r.articles.create(NewArticle::published("Python tips", "Rust in the body")).await.unwrap();
    r.articles.create(NewArticle::draft("Rust drafts", "x")).await.unwrap();
    r.articles.create(NewArticle::published("More Rust", "x")).await.unwrap();

    let found = r.articles.search("Rust").await.unwrap();
    assert_eq!(titles(&found), ["More Rust", "Rust async"]);

    let anchored = r.articles.search("^Rust").await.unwrap();
    assert_eq!(titles(&anchored), ["Rust async"]);
}

#[tokio::test]
async fn search_with_invalid_pattern_matches_literally() {
    let r = setup().await;
    r.articles.create(NewArticle::published("Notes (draft", "x")).await.unwrap();
    r.articles.create(NewArticle::published("Notes", "x")).await.unwrap();

    let found = r.articles.search("(draft").await.unwrap();
    assert_eq!(titles(&found), ["Notes (draft"]);
}

#[tokio::test]
async fn empty_search_returns_nothing() {
    let r = setup().await;
    r.articles.create(NewArticle::published("Anything", "x")).await.unwrap();
    assert!(r.articles.search("").await.unwrap().is_empty());
}

// ── Counters ───────────────────────────────────────────────

#[tokio::test]
async fn each_view_increments_by_exactly_one() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Counted", "x")).await.unwrap();
    assert_eq!(article.views, 0);

    for expected in 1..=5 {
        let viewed = r.articles.record_view(article.id).await.unwrap();
        assert_eq!(viewed.views, expected);
    }

    let listed = r.articles.list_published().await.unwrap();
    assert_eq!(listed[0].views, 5);
    assert_eq!(listed[0].last_modified_time, article.last_modified_time);
}

#[tokio::test]
async fn counters_on_missing_article_are_not_found() {
    let r = setup().await;
    assert!(r.articles.record_view(1).await.unwrap_err().is_not_found());
    assert!(r.articles.add_like(1).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn likes_accumulate() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Liked", "x")).await.unwrap();
    r.articles.add_like(article.id).await.unwrap();
    let liked = r.articles.add_like(article.id).await.unwrap();
    assert_eq!(liked.likes, 2);
    assert_eq!(liked.views, 0);
}

// ── Relationships ──────────────────────────────────────────

#[tokio::test]
async fn deleting_a_category_keeps_its_articles() {
    let r = setup().await;
    let tech = r.categories.create(NewCategory::new("Tech")).await.unwrap();
    let article = r
        .articles
        .create(NewArticle::published("Orphan", "x").in_category(tech.id))
        .await
        .unwrap();

    r.categories.delete(tech.id).await.unwrap();

    let reloaded = r.articles.get_by_id(article.id).await.unwrap();
    assert_eq!(reloaded.category_id, None);
    assert_eq!(reloaded.category_name, None);
    assert!(r.categories.get(tech.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deleting_an_article_removes_its_comments() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Doomed", "x")).await.unwrap();
    let keeper = r.articles.create(NewArticle::published("Keeper", "x")).await.unwrap();
    r.comments.create(comment(article.id, "ann", "first!")).await.unwrap();
    r.comments.create(comment(article.id, "bob", "second")).await.unwrap();
    r.comments.create(comment(keeper.id, "cid", "stays")).await.unwrap();

    r.articles.delete(article.id).await.unwrap();

    assert!(r.comments.list_for_article(article.id).await.unwrap().is_empty());
    assert_eq!(r.comments.list_for_article(keeper.id).await.unwrap().len(), 1);
    assert!(r.articles.delete(article.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deleting_a_tag_only_drops_membership() {
    let r = setup().await;
    let tag = r.tags.create(NewTag::new("gone")).await.unwrap();
    let article = r
        .articles
        .create(NewArticle::published("Still here", "x").with_tags([tag.id]))
        .await
        .unwrap();

    r.tags.delete(tag.id).await.unwrap();

    assert!(r.articles.tags_of(article.id).await.unwrap().is_empty());
    assert_eq!(r.articles.get_by_id(article.id).await.unwrap().title, "Still here");
}

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Chatty", "x")).await.unwrap();
    r.comments.create(comment(article.id, "ann", "one")).await.unwrap();
    r.comments.create(comment(article.id, "bob", "two")).await.unwrap();

    let bodies: Vec<_> = r
        .comments
        .list_for_article(article.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.body)
        .collect();
    assert_eq!(bodies, ["one", "two"]);
}

#[tokio::test]
async fn deleting_a_comment_removes_only_that_comment() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Moderated", "x")).await.unwrap();
    let spam = r.comments.create(comment(article.id, "bot", "buy now")).await.unwrap();
    r.comments.create(comment(article.id, "ann", "nice")).await.unwrap();

    r.comments.delete(spam.id).await.unwrap();

    let left = r.comments.list_for_article(article.id).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].user_name, "ann");
    assert!(r.comments.delete(spam.id).await.unwrap_err().is_not_found());
    assert!(r.articles.get_by_id(article.id).await.is_ok());
}

#[tokio::test]
async fn taxonomy_lists_are_sorted_by_name() {
    let r = setup().await;
    for name in ["Zeta", "Alpha", "Mu"] {
        r.categories.create(NewCategory::new(name)).await.unwrap();
        r.tags.create(NewTag::new(name.to_lowercase())).await.unwrap();
    }
    let categories: Vec<_> = r.categories.list().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(categories, ["Alpha", "Mu", "Zeta"]);
    let tags: Vec<_> = r.tags.list().await.unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(tags, ["alpha", "mu", "zeta"]);
}

// ── Validation ─────────────────────────────────────────────

#[tokio::test]
async fn comment_with_empty_body_is_rejected_without_a_row() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::published("Quiet", "x")).await.unwrap();

    let err = r.comments.create(comment(article.id, "ann", "   ")).await.unwrap_err();
    match err {
        DataError::Validation(errors) => assert!(errors.contains("body")),
        other => panic!("expected validation error, got {other}"),
    }
    assert!(r.comments.list_for_article(article.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_on_missing_article_is_not_found() {
    let r = setup().await;
    let err = r.comments.create(comment(404, "ann", "hello")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn article_field_limits_are_enforced() {
    let r = setup().await;

    let long_title = NewArticle::published("t".repeat(101), "x");
    assert!(matches!(r.articles.create(long_title).await, Err(DataError::Validation(_))));

    let long_summary = NewArticle::published("ok", "x").with_summary("s".repeat(55));
    match r.articles.create(long_summary).await.unwrap_err() {
        DataError::Validation(errors) => assert!(errors.contains("summary")),
        other => panic!("expected validation error, got {other}"),
    }

    let fits = NewArticle::published("ok", "x").with_summary("s".repeat(54));
    assert!(r.articles.create(fits).await.is_ok());
}

#[tokio::test]
async fn article_with_unknown_category_is_not_found() {
    let r = setup().await;
    let err = r
        .articles
        .create(NewArticle::published("Lost", "x").in_category(9))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(r.articles.list_published().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_update_leaves_the_article_untouched() {
    let r = setup().await;
    let article = r.articles.create(NewArticle::draft("Draft", "x")).await.unwrap();

    let err = r
        .articles
        .update(
            article.id,
            ArticleChanges {
                title: Some(String::new()),
                status: Some(ArticleStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Validation(_)));

    let reloaded = r.articles.get_by_id(article.id).await.unwrap();
    assert_eq!(reloaded.title, "Draft");
    assert_eq!(reloaded.status, ArticleStatus::Draft);
}

#[tokio::test]
async fn category_and_tag_names_are_bounded() {
    let r = setup().await;
    assert!(matches!(
        r.categories.create(NewCategory::new("")).await,
        Err(DataError::Validation(_))
    ));
    assert!(matches!(
        r.tags.create(NewTag::new("x".repeat(21))).await,
        Err(DataError::Validation(_))
    ));
    let tech = r.categories.create(NewCategory::new("Tech")).await.unwrap();
    assert_eq!(r.categories.rename(tech.id, "Technology").await.unwrap().name, "Technology");
    assert!(r.categories.rename(tech.id, "x".repeat(21)).await.is_err());
}

#[tokio::test]
async fn suggestions_are_bounded_to_200_characters() {
    let r = setup().await;

    let stored = r.suggestions.create(NewSuggestion::new("Add dark mode")).await.unwrap();
    assert_eq!(stored.suggest, "Add dark mode");

    assert!(matches!(
        r.suggestions.create(NewSuggestion::new("x".repeat(201))).await,
        Err(DataError::Validation(_))
    ));
    assert!(matches!(
        r.suggestions.create(NewSuggestion::new("")).await,
        Err(DataError::Validation(_))
    ));
    assert!(r.suggestions.create(NewSuggestion::new("é".repeat(200))).await.is_ok());

    assert_eq!(r.suggestions.count().await.unwrap(), 2);
    assert_eq!(r.suggestions.list().await.unwrap()[1].suggest, "Add dark mode");
}
