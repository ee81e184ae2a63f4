//! Inline CSS declaration block for the Quokka style engine.
//!
//! # Scope
//!
//! This crate implements the object behind an element's `style` attribute
//! (or a rule's style) for DOM emulation layers that mimic browser
//! style-object behavior without a layout engine:
//!
//! - **Value Grammar Parser** ([CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Classification of raw value strings (integer, number, length,
//!     percentage, color, angle, url, string, keyword, calc, `var()`)
//!   - Canonicalizing typed parsers; colors per
//!     [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! - **Declaration Store** ([CSSOM § 6.6](https://drafts.csswg.org/cssom/#css-declaration-blocks))
//!   - Ordered, priority-tagged property map with change notification
//!   - `cssText` serialization and fail-soft bulk parsing
//!
//! - **Shorthand/Longhand Synchronization**
//!   ([CSS Cascade § 9.2](https://www.w3.org/TR/css-cascade-4/#shorthand))
//!   - Corner expansion and collapse for margin/padding and the border lines
//!   - Structured shorthands (border sides, outline, font)
//!   - The border, background, and flex composites
//!   - Opaque `var()` values
//!     ([CSS Variables § 3](https://www.w3.org/TR/css-variables-1/#using-variables))
//!
//! # Not Implemented
//!
//! Selector matching, multi-rule cascade and specificity, computed-style
//! resolution against layout, full stylesheet grammar, and rendering. The
//! block is a pure in-memory string machine owned by one external context.

/// The declaration block and its primitives per [CSSOM § 6.6](https://drafts.csswg.org/cssom/#css-declaration-blocks).
pub mod declaration;
/// Hard-failure error taxonomy (everything else is silent rejection).
pub mod error;
/// The property descriptor registry and per-property handlers.
pub mod properties;
/// Shorthand/longhand synchronization strategies.
pub mod shorthand;
/// Value grammar classification and canonicalizing parsers.
pub mod values;

// Re-exports for convenience
pub use declaration::{ChangeHandler, Priority, SetInput, StyleDeclaration};
pub use error::StyleError;
pub use properties::{Descriptor, SUPPORTED_PROPERTIES, is_supported};
pub use values::color::Rgba;
pub use values::{Parsed, ValueKind, classify};
