/// An item that can be found through the search box of a list page.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Returns the items whose searchable fields contain `query`,
/// case-insensitively. A blank query matches everything.
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}

pub fn matches<T: Searchable>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || item.search_fields().iter().any(|field| field.to_lowercase().contains(&query))
}

/// Optional text fields are searched when present.
pub fn fields<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    values.into_iter().flatten().collect()
}
