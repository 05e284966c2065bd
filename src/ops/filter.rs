use crate::model::user::{UserField, UserRecord};

/// Case-insensitive substring test. An empty needle matches everything.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Whether any of the five text fields of `record` contains `query`,
/// ignoring case.
pub fn matches(record: &UserRecord, query: &str) -> bool {
    let needle = query.to_lowercase();
    UserField::ALL
        .iter()
        .any(|&f| contains_ci(record.field(f), &needle))
}

/// The fields of `record` that contain `query`, in display order.
///
/// Empty for an empty query: there is nothing to highlight.
pub fn matched_fields(record: &UserRecord, query: &str) -> Vec<UserField> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    UserField::ALL
        .into_iter()
        .filter(|&f| contains_ci(record.field(f), &needle))
        .collect()
}

/// Records matching `query`, in their original order.
///
/// Plain substring containment over name, username, email, phone and website.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a UserRecord>
where
    I: IntoIterator<Item = &'a UserRecord>,
{
    records.into_iter().filter(|r| matches(r, query)).collect()
}
