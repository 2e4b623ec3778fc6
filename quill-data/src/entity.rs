/// A persisted row type with an integer primary key.
///
/// Gives the repositories enough metadata to share existence checks and
/// deletes across tables.
///
/// ```ignore
/// impl Entity for Category {
///     fn table_name() -> &'static str { "categories" }
///     fn label() -> &'static str { "Category" }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    fn table_name() -> &'static str;

    fn id_column() -> &'static str {
        "id"
    }

    /// Human-readable name used in not-found messages.
    fn label() -> &'static str;
}
