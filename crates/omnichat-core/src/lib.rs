//! # omnichat-core - Core Domain Types
//!
//! Foundation crate for the OmniChat simulator. Provides domain types, the
//! theme registry, overlay element definitions, markup helpers, error handling
//! and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing, uuid, base64).
//!
//! ## Public API
//!
//! ### Themes (`theme`)
//! - [`AppTheme`] - Closed set of presets plus `Custom`
//! - [`ThemeConfig`] / [`theme_config()`] - Static display configuration lookup
//!
//! ### Domain Types (`types`)
//! - [`ChatMessage`], [`Role`] - Simulated conversation turns
//! - [`Identity`] - Signed-in principal
//! - [`SavedLayout`], [`CustomLayout`] - Generated markup, live or persisted
//!
//! ### Overlays (`element`)
//! - [`DynamicElement`], [`ElementKind`] - Tagged union of injectable widgets
//! - [`PresetWidget`] - Stock widgets offered by the inject menu
//!
//! ### Markup (`markup`)
//! - [`strip_code_fences()`], [`DataUri`], [`tokenize()`], [`export_document()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use omnichat_core::prelude::*;
//! ```

pub mod element;
pub mod error;
pub mod logging;
pub mod markup;
pub mod prelude;
pub mod theme;
pub mod types;

pub use element::{
    AccentColor, DynamicElement, ElementId, ElementKind, PresetWidget, WidgetIcon, WidgetProps,
};
pub use error::{Error, Result, ResultExt};
pub use markup::{
    export_document, strip_code_fences, tokenize, visible_text, widget_fallback, DataUri,
    MarkupToken, LAYOUT_FALLBACK,
};
pub use theme::{theme_config, AppTheme, FontFamily, Rgb, SidebarStyle, ThemeConfig, ThemeIcon};
pub use types::{
    AppPhase, ChatMessage, CustomLayout, Identity, LayoutOrigin, MessageId, Role, SavedLayout,
};
