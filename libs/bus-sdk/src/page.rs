use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page conversion: {0}")]
    InvalidNumber(String),

    #[error("rows conversion: {0}")]
    InvalidRows(String),

    #[error("rows value too large, must be less than {max}")]
    RowsTooLarge { max: u32 },

    #[error("page value too small, must be larger than 0")]
    NumberTooSmall,

    #[error("rows value too small, must be larger than 0")]
    RowsTooSmall,
}

/// One-based page request: which page and how many rows per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPage")]
pub struct Page {
    number: u32,
    rows: u32,
}

/// Wire shape of [`Page`]; deserialized values go through [`Page::new`].
#[derive(Deserialize)]
struct RawPage {
    number: u32,
    rows: u32,
}

impl TryFrom<RawPage> for Page {
    type Error = PageError;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        Self::new(raw.number, raw.rows)
    }
}

impl Page {
    /// Build a page from already-validated numbers.
    pub fn new(number: u32, rows: u32) -> Result<Self, PageError> {
        if number == 0 {
            return Err(PageError::NumberTooSmall);
        }
        if rows == 0 {
            return Err(PageError::RowsTooSmall);
        }
        Ok(Self { number, rows })
    }

    /// Parse raw query-string values. Blank `page` means the first page and
    /// blank `rows` means `default_rows`.
    pub fn parse(
        page: &str,
        rows: &str,
        default_rows: u32,
        max_rows: u32,
    ) -> Result<Self, PageError> {
        let number = match page.trim() {
            "" => 1,
            p => p
                .parse::<u32>()
                .map_err(|e| PageError::InvalidNumber(e.to_string()))?,
        };

        let rows = match rows.trim() {
            "" => default_rows,
            r => r
                .parse::<u32>()
                .map_err(|e| PageError::InvalidRows(e.to_string()))?,
        };

        if rows > max_rows {
            return Err(PageError::RowsTooLarge { max: max_rows });
        }

        Self::new(number, rows)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> usize {
        (self.number.saturating_sub(1) as usize).saturating_mul(self.rows as usize)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            rows: 10,
        }
    }
}
