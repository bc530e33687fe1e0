//! Rules for the data input page: CSV upload previews and manual entries.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dashboard_data::{CsvError, CsvPreview, preview_csv};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// File extensions accepted by the upload widget.
pub const UPLOAD_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Records shown in an upload preview.
pub const PREVIEW_ROWS: usize = 5;

/// Inclusive age bounds for manual entries.
pub const AGE_RANGE: (u8, u8) = (0, 120);

/// Age pre-filled in the manual entry form.
pub const AGE_DEFAULT: u8 = 25;

/// Longest accepted manual entry name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Reasons an upload cannot be previewed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The file name does not end in an accepted extension.
    #[error("unsupported file type for '{file_name}'; expected .csv or .txt")]
    UnsupportedFileType { file_name: String },
    /// The body is larger than the configured limit.
    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    /// The body is not a well-formed delimited file.
    #[error("malformed CSV upload: {0}")]
    Malformed(#[from] CsvError),
}

/// Preview an uploaded file after checking its name and size.
///
/// # Errors
///
/// Returns [`UploadError`] when the extension is not accepted, the body is
/// over `limit` bytes, or the body fails to parse.
///
/// # Examples
/// ```
/// use backend::domain::{UploadError, preview_upload};
///
/// let preview = preview_upload("scores.csv", b"name,score\nada,9\n", 1024).expect("preview");
/// assert_eq!(preview.total_rows, 1);
///
/// let err = preview_upload("scores.xlsx", b"", 1024).expect_err("rejected");
/// assert!(matches!(err, UploadError::UnsupportedFileType { .. }));
/// ```
pub fn preview_upload(
    file_name: &str,
    body: &[u8],
    limit: usize,
) -> Result<CsvPreview, UploadError> {
    let accepted = Path::new(file_name).extension().is_some_and(|ext| {
        UPLOAD_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    });
    if !accepted {
        return Err(UploadError::UnsupportedFileType {
            file_name: file_name.to_owned(),
        });
    }
    if body.len() > limit {
        return Err(UploadError::TooLarge {
            size: body.len(),
            limit,
        });
    }
    Ok(preview_csv(body, PREVIEW_ROWS)?)
}

/// Manual entry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    /// Every category, in form order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Single-letter label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| EntryError::UnknownCategory {
                value: s.to_owned(),
            })
    }
}

/// Manual entry values that fall outside the form's domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// The name is longer than [`NAME_MAX_CHARS`].
    #[error("name must be at most {max} characters, got {length}")]
    NameTooLong { length: usize, max: usize },
    /// The age is outside [`AGE_RANGE`].
    #[error("age must be between {min} and {max}, got {value}")]
    AgeOutOfRange { value: i64, min: u8, max: u8 },
    /// The category is not `A`, `B` or `C`.
    #[error("category must be one of A, B, C; got '{value}'")]
    UnknownCategory { value: String },
}

impl EntryError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameTooLong { .. } => "name",
            Self::AgeOutOfRange { .. } => "age",
            Self::UnknownCategory { .. } => "category",
        }
    }
}

/// Validated manual entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    name: String,
    age: u8,
    category: Category,
}

impl ManualEntry {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError`] for an over-long name, an age outside
    /// `0..=120` or an unknown category.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Category, ManualEntry};
    ///
    /// let entry = ManualEntry::new("Ada", 36, "B").expect("valid entry");
    /// assert_eq!(entry.category(), Category::B);
    /// assert_eq!(entry.summary(), "Submitted: Ada, 36, B");
    /// ```
    pub fn new(name: &str, age: i64, category: &str) -> Result<Self, EntryError> {
        let name = name.trim();
        let length = name.chars().count();
        if length > NAME_MAX_CHARS {
            return Err(EntryError::NameTooLong {
                length,
                max: NAME_MAX_CHARS,
            });
        }
        let (min, max) = AGE_RANGE;
        let age = u8::try_from(age)
            .ok()
            .filter(|value| (min..=max).contains(value))
            .ok_or(EntryError::AgeOutOfRange {
                value: age,
                min,
                max,
            })?;
        Ok(Self {
            name: name.to_owned(),
            age,
            category: category.parse()?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Confirmation line shown after submission.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Submitted: {}, {}, {}", self.name, self.age, self.category)
    }
}
