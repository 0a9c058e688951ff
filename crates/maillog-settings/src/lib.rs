//! Declarative settings registry and renderer
//!
//! This module provides:
//! - Section and field descriptors built once at startup via builders
//! - A registry that seeds/backfills stored option mappings and registers
//!   sections and fields with the host page layout
//! - Field-kind-specific HTML renderers writing to an output stream
//! - Per-section sanitization of submitted form data
//!
//! Descriptors are immutable value objects; the mutable registry is frozen
//! after configuration and the frozen registry is passed explicitly to the
//! code that needs it.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod descriptor;
pub mod registry;
pub mod render;
pub mod sanitize;

pub use descriptor::{
	FieldDescriptor, FieldDescriptorBuilder, FieldKind, SanitizeFn, SectionDescriptor,
};
pub use registry::{FrozenSettingsRegistry, SettingsHost, SettingsRegistry};
pub use render::{FieldRenderer, RenderContext, Renderers};

mod prelude;

// vim: ts=4
