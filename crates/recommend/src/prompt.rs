use crate::error::Result;
use crate::schema::{BookRecord, sample_books};

pub const PREAMBLE: &str = r#"I've read these books recently and really enjoyed them.

I am providing the information to you in JSON format, with two name-value pairs describing the name and author of each book.

Using the same JSON structure, please give me a recommendation for three new books to read.

"#;

pub const SUFFIX: &str = r#"

Please include only the JSON structure in your response, with no other text before or after your reply."#;

/// Build the recommendation prompt for a list of liked books.
///
/// The books are embedded as a pretty-printed JSON array between the fixed
/// preamble and suffix. Output depends only on the order and content of
/// `books`.
pub fn build_recommendation_prompt(books: &[BookRecord]) -> Result<String> {
    let books_json = serde_json::to_string_pretty(books)?;

    let mut prompt = String::with_capacity(PREAMBLE.len() + books_json.len() + SUFFIX.len());
    prompt.push_str(PREAMBLE);
    prompt.push_str(&books_json);
    prompt.push_str(SUFFIX);

    Ok(prompt)
}

/// Prompt for the fixed three-book example set.
pub fn build_sample_prompt() -> Result<String> {
    build_recommendation_prompt(&sample_books())
}
