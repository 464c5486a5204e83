//! # Virtual Page Scrolling
//!
//! The showcase behaves like a long web page drawn over the 3D scene. This
//! module owns that page: its sections, the scroll offset and the derived
//! scroll fraction that drives the camera, plus the visibility observer that
//! fades section cards in and out.

pub mod page;
pub mod visibility;

pub use page::{PageLayout, ScrollState, Section, SectionId};
pub use visibility::{FadeTransition, VisibilityChange, VisibilityObserver};
