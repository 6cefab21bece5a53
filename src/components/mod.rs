pub mod carousel;
pub mod progress_ring;
pub mod tabs;
pub mod typing_slider;

use thiserror::Error;

/// Why a component refused to attach to the page.
///
/// Mount functions handle their own degradation (hiding controls, attaching
/// nothing) before returning one of these; the value exists so the
/// composition root can log the diagnostic. Nothing propagates further.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("required element `{0}` not found")]
    MissingAnchor(&'static str),
    #[error("`{parent}` contains no {expected}")]
    EmptyCollection {
        parent: &'static str,
        expected: &'static str,
    },
}
