use serde::{Deserialize, Serialize};

/// A book the user liked, or one the model recommended.
///
/// On the wire the title travels as `name`, matching what the prompt tells
/// the model about the JSON it receives and must echo back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    #[serde(rename = "name")]
    pub title: String,
    pub author: String,
}

impl BookRecord {
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Books a session has recorded, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingList {
    books: Vec<BookRecord>,
}

impl ReadingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two books every interactive session starts with.
    pub fn seeded() -> Self {
        Self {
            books: vec![
                BookRecord::new(1, "Outlander", "Diana Gabaldon"),
                BookRecord::new(2, "The Mountain in the Sea", "Ray Nayler"),
            ],
        }
    }

    /// Record a book. Ids are sequential (`len + 1`) and the new book goes
    /// to the front of the list.
    pub fn add(&mut self, title: impl Into<String>, author: impl Into<String>) -> &BookRecord {
        let id = self.books.len() as i64 + 1;
        self.books.insert(0, BookRecord::new(id, title, author));
        &self.books[0]
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Fixed example set used by the one-shot sample request.
pub fn sample_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(1, "Outlander", "Diana Gabaldon"),
        BookRecord::new(2, "The Mountain in the Sea", "Ray Nayler"),
        BookRecord::new(3, "Dark Matter", "Blake Crouch"),
    ]
}
