//! Property-name heuristics for leaf values.
//!
//! Each table is scanned in order and the first entry with a needle occurring
//! (case-insensitively) in the property name wins.

type Table<T> = &'static [(&'static [&'static str], T)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringHint {
    Identifier,
    /// `"sample"` followed by the capitalised property name
    Name,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerHint {
    Identifier,
    Fixed(i64),
    CurrentYear,
    /// Pseudo-random value in the inclusive range
    Between(i64, i64),
}

pub const STRING_HINTS: Table<StringHint> = &[
    (&["id"], StringHint::Identifier),
    (&["name"], StringHint::Name),
    (&["email"], StringHint::Fixed("user@example.com")),
    (&["url", "link"], StringHint::Fixed("https://example.com")),
    (&["phone"], StringHint::Fixed("+1-555-123-4567")),
    (&["address"], StringHint::Fixed("123 Main Street")),
    (&["city"], StringHint::Fixed("Sample City")),
    (&["country"], StringHint::Fixed("Sample Country")),
    (
        &["description", "comment"],
        StringHint::Fixed("This is a sample description"),
    ),
    (&["status"], StringHint::Fixed("active")),
    (&["type", "category"], StringHint::Fixed("sample")),
];

pub const INTEGER_HINTS: Table<IntegerHint> = &[
    (&["id"], IntegerHint::Identifier),
    (&["count", "quantity"], IntegerHint::Fixed(5)),
    (&["age"], IntegerHint::Fixed(25)),
    (&["year"], IntegerHint::CurrentYear),
    (&["month"], IntegerHint::Between(1, 12)),
    (&["day"], IntegerHint::Between(1, 28)),
    (&["price", "amount"], IntegerHint::Fixed(100)),
];

pub const NUMBER_HINTS: Table<f64> = &[
    (&["price", "amount", "cost"], 99.99),
    (&["rate", "percentage"], 0.15),
    (&["weight"], 1.5),
    (&["height"], 1.75),
];

pub const BOOLEAN_HINTS: Table<bool> = &[
    (&["active", "enabled", "available"], true),
    (&["deleted", "disabled", "hidden"], false),
];

pub fn lookup<T: Copy>(table: Table<T>, property: Option<&str>) -> Option<T> {
    let property = property?.to_lowercase();
    table
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| property.contains(needle)))
        .map(|(_, hint)| *hint)
}

/// `"sample"` + property name with its first character upper-cased
pub fn sample_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("sample{}{}", first.to_uppercase(), chars.as_str()),
        None => "sample".to_string(),
    }
}
