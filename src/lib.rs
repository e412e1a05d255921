//! # gsap-attr-core
//!
//! Declarative animation attributes parsed into engine-ready animation plans.
//!
//! Elements describe their animation with attributes:
//!
//! ```html
//! <div gsap-tl="repeat: -1; yoyo: true"
//!      gsap-to="x: 100; opacity: 0.5"
//!      gsap-max="x: 50"
//!      gsap-ease="expo.out"></div>
//! ```
//!
//! This crate provides platform-agnostic logic for:
//! - Parsing directive values (`key: value;` or `{key: value}` syntax) into typed property bags
//! - Applying `max`/`min`/`negative` constraints from sibling attributes
//! - Building an ordered [`AnimationPlan`] of tweens, timelines and scroll tweens
//! - Driving any [`AnimationEngine`] with that plan (with optional gsap support in the browser)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load a [`BindingConfig`] from TOML
//! - `web` - Enable the browser backend and the `applyAnimations` wasm export
//!
//! ## Example
//!
//! ```rust,ignore
//! use gsap_attr_core::{Binder, BindingConfig};
//!
//! // Any element type implementing AttributeSource and an engine for it
//! let binder = Binder::new(BindingConfig::default());
//! let report = binder.apply_all(elements.iter(), &mut engine);
//!
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod config;
mod constraint;
mod directive;
pub mod parser;
pub mod plan;
mod scan;
mod value;

pub use config::{BindingConfig, ScrollDefaults};
pub use constraint::ConstraintSet;
pub use directive::{AttributeSource, Attributes, Directive, DirectiveName, ElementDirectives};
pub use parser::{parse_value, ParseError, Syntax};
pub use plan::{
    AnimationEngine, AnimationPlan, Command, ScrollTrigger, ScrollTween, TimelinePlan, Tween,
    TweenKind,
};
pub use scan::{Binder, Diagnostic, DiagnosticKind, ElementPlan, ScanReport};
pub use value::{PropValue, PropertyBag};

#[cfg(feature = "web")]
pub use plan::web::GsapEngine;
#[cfg(feature = "web")]
pub use scan::web::{apply_animations, apply_document};
