//! Error types for the declaration block API.
//!
//! [CSSOM § 6.7.1](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
//!
//! CSS value parsing is forgiving: a value that fails its grammar leaves the
//! targeted property unchanged, with no error surfaced. The only hard
//! failures are API misuse at the binding boundary, modeled here.

use thiserror::Error;

/// Hard failures surfaced to the external caller.
///
/// Everything else in the engine is silent rejection: validators communicate
/// through an internal rejected signal consumed by the setter chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// `item()` was invoked without an index.
    ///
    /// [WebIDL § 3.7](https://webidl.spec.whatwg.org/#dfn-overload-resolution-algorithm)
    /// requires an argument-count TypeError when a required argument is
    /// missing; DOM binding layers map this variant to that error.
    #[error("item: 1 argument required, but only 0 present")]
    MissingItemIndex,

    /// A value with no defined string conversion was passed where CSS text
    /// was expected. Unreachable from typed Rust callers; DOM binding layers
    /// that accept arbitrary host values map their stringification failure
    /// to this variant.
    #[error("cannot convert value to a CSS string")]
    NotStringifiable,
}
