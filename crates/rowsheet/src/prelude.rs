//! Prelude module - common imports for rowsheet users
//!
//! ```rust
//! use rowsheet::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellInfo,
    CellValue,
    // Colors
    CellColors,
    ColorMode,
    ColorName,
    // Error types
    Error,
    FillColor,
    // Options
    HandlerOptions,
    HeaderKeys,
    LoadOptions,
    PaintTarget,
    Record,
    Result,
    // Main types
    SheetHandler,
};
