//! Handler and load options

/// Default number of rows materialized per page
pub const DEFAULT_PAGE_SIZE: u32 = 5000;

/// How header cells become record keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderKeys {
    /// Header text with surrounding whitespace removed
    #[default]
    Trimmed,
    /// Lower-cased, a trailing ` (*)` marker dropped, spaces replaced by `_`
    ///
    /// `"Product Name (*)"` becomes `"product_name"`.
    Normalized,
}

/// How cell colors are reported by full-info rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Font color and both fill stops as 8-digit ARGB strings
    #[default]
    Argb,
    /// Coarse names for the font color and the fill's end stop
    Named,
}

/// When a row fetch moves the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Every successful fetch advances the cursor by one, including fetches
    /// of an explicit row number
    #[default]
    AdvanceOnEveryFetch,
    /// Only parameterless fetches advance the cursor
    SequentialOnly,
}

/// Options fixed for the lifetime of a [`SheetHandler`](crate::SheetHandler)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Maximum rows per page (default: 5000, values below 1 are treated as 1)
    pub page_size: u32,
    /// Header key form (default: trimmed)
    pub header_keys: HeaderKeys,
    /// Color presentation for full-info rows (default: ARGB)
    pub color_mode: ColorMode,
    /// Cursor behavior on explicit fetches (default: advance on every fetch)
    pub cursor_policy: CursorPolicy,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            header_keys: HeaderKeys::default(),
            color_mode: ColorMode::default(),
            cursor_policy: CursorPolicy::default(),
        }
    }
}

impl HandlerOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the header key form
    pub fn header_keys(mut self, header_keys: HeaderKeys) -> Self {
        self.header_keys = header_keys;
        self
    }

    /// Set the color presentation
    pub fn color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// Set the cursor policy
    pub fn cursor_policy(mut self, cursor_policy: CursorPolicy) -> Self {
        self.cursor_policy = cursor_policy;
        self
    }

    pub(crate) fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}

/// Options for a single load of a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Read row 1 as the header (default: true)
    pub with_header: bool,
    /// Discard the cursor of a previous load (default: false)
    pub force_reset: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            with_header: true,
            force_reset: false,
        }
    }
}

impl LoadOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Read rows as plain value lists, without a header
    pub fn without_header() -> Self {
        Self {
            with_header: false,
            ..Self::default()
        }
    }

    /// Set header mode
    pub fn with_header(mut self, with_header: bool) -> Self {
        self.with_header = with_header;
        self
    }

    /// Set whether a reload starts over from the first data row
    pub fn force_reset(mut self, force_reset: bool) -> Self {
        self.force_reset = force_reset;
        self
    }

    /// First row holding data
    pub(crate) fn first_data_row(&self) -> u32 {
        if self.with_header {
            2
        } else {
            1
        }
    }
}
