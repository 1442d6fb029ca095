//! Ordered catalogue of canonical book names.
//!
//! The catalogue is an ordinary value handed to the parser and the reader,
//! so tests can swap in fixtures. Chapter counts are informational only: no
//! component rejects a chapter because the catalogue says it does not exist.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::normalize;
use super::reference::is_addressable;
use crate::config::Config;
use crate::error::{Error, Result};

/// A canonical book title and its chapter count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Canonical display name (e.g. "1 Cronicas").
    pub name: String,
    /// Number of chapters in the book.
    pub chapters: u32,
}

/// Reina-Valera book order and chapter counts.
const SPANISH_BOOKS: &[(&str, u32)] = &[
    // Antiguo Testamento
    ("Genesis", 50),
    ("Exodo", 40),
    ("Levitico", 27),
    ("Numeros", 36),
    ("Deuteronomio", 34),
    ("Josue", 24),
    ("Jueces", 21),
    ("Rut", 4),
    ("1 Samuel", 31),
    ("2 Samuel", 24),
    ("1 Reyes", 22),
    ("2 Reyes", 25),
    ("1 Cronicas", 29),
    ("2 Cronicas", 36),
    ("Esdras", 10),
    ("Nehemias", 13),
    ("Ester", 10),
    ("Job", 42),
    ("Salmos", 150),
    ("Proverbios", 31),
    ("Eclesiastes", 12),
    ("Cantares", 8),
    ("Isaias", 66),
    ("Jeremias", 52),
    ("Lamentaciones", 5),
    ("Ezequiel", 48),
    ("Daniel", 12),
    ("Oseas", 14),
    ("Joel", 3),
    ("Amos", 9),
    ("Abdias", 1),
    ("Jonas", 4),
    ("Miqueas", 7),
    ("Nahum", 3),
    ("Habacuc", 3),
    ("Sofonias", 3),
    ("Hageo", 2),
    ("Zacarias", 14),
    ("Malaquias", 4),
    // Nuevo Testamento
    ("Mateo", 28),
    ("Marcos", 16),
    ("Lucas", 24),
    ("Juan", 21),
    ("Hechos", 28),
    ("Romanos", 16),
    ("1 Corintios", 16),
    ("2 Corintios", 13),
    ("Galatas", 6),
    ("Efesios", 6),
    ("Filipenses", 4),
    ("Colosenses", 4),
    ("1 Tesalonicenses", 5),
    ("2 Tesalonicenses", 3),
    ("1 Timoteo", 6),
    ("2 Timoteo", 4),
    ("Tito", 3),
    ("Filemon", 1),
    ("Hebreos", 13),
    ("Santiago", 5),
    ("1 Pedro", 5),
    ("2 Pedro", 3),
    ("1 Juan", 5),
    ("2 Juan", 1),
    ("3 Juan", 1),
    ("Judas", 1),
    ("Apocalipsis", 22),
];

/// Immutable, ordered list of books with precomputed lookup keys.
#[derive(Debug, Clone)]
pub struct Catalogue {
    books: Vec<Book>,
    /// `normalize(name)` for each entry in `books`, same order.
    keys: Vec<String>,
}

impl Catalogue {
    /// The built-in 66-book Spanish catalogue.
    pub fn spanish() -> Self {
        let books: Vec<Book> = SPANISH_BOOKS
            .iter()
            .map(|&(name, chapters)| Book { name: name.to_string(), chapters })
            .collect();
        let keys = books.iter().map(|b| normalize(&b.name)).collect();
        Self { books, keys }
    }

    /// Build a catalogue from arbitrary entries.
    ///
    /// Rejects an empty list, books with zero chapters, names that collide
    /// once normalized, and names no reference could spell (only letters,
    /// spaces and a leading `1 `, `2 ` or `3 ` are allowed).
    pub fn from_books(books: Vec<Book>) -> Result<Self> {
        if books.is_empty() {
            return Err(Error::Catalogue("catalogue has no books".to_string()));
        }

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(books.len());
        for book in &books {
            if book.chapters == 0 {
                return Err(Error::Catalogue(format!("{} has no chapters", book.name)));
            }
            let key = normalize(&book.name);
            if key.is_empty() {
                return Err(Error::Catalogue("book with empty name".to_string()));
            }
            if !is_addressable(&key) {
                return Err(Error::Catalogue(format!("book name not addressable: {}", book.name)));
            }
            if !seen.insert(key.clone()) {
                return Err(Error::Catalogue(format!("duplicate book name: {}", book.name)));
            }
            keys.push(key);
        }

        Ok(Self { books, keys })
    }

    /// Load a catalogue from a JSON array of `{"name", "chapters"}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let books: Vec<Book> = serde_json::from_str(&content).map_err(|e| {
            Error::Catalogue(format!("failed to parse {}: {e}", path.display()))
        })?;
        tracing::debug!("Loaded {} books from {}", books.len(), path.display());
        Self::from_books(books)
    }

    /// The configured catalogue override, or the built-in one.
    pub fn load(config: &Config) -> Result<Self> {
        config
            .catalogue_path
            .as_deref()
            .map_or_else(|| Ok(Self::spanish()), Self::from_json_file)
    }

    /// All books in canonical order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalogue is empty (never true for a constructed catalogue).
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book at a position in canonical order.
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Resolve a book phrase by normalized equality.
    pub fn find(&self, phrase: &str) -> Option<&Book> {
        let key = normalize(phrase);
        self.keys
            .iter()
            .position(|k| *k == key)
            .and_then(|idx| self.books.get(idx))
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::spanish()
    }
}
