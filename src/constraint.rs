//! Min/max/negative post-processing of parsed property bags.

use crate::scan::{parse_directive, Diagnostic};
use crate::{DirectiveName, ElementDirectives, PropValue, PropertyBag};

/// Per-element constraints read from the `max`, `min` and `negative`
/// directives.
///
/// Each bag is keyed by the same property names as the bag being resolved.
/// A constraint only affects keys present in both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintSet {
    pub max: PropertyBag,
    pub min: PropertyBag,
    pub negative: PropertyBag,
}

impl ConstraintSet {
    /// Build the set from an element's `max`, `min` and `negative` directives.
    ///
    /// A constraint that cannot be parsed is left empty and reported; the
    /// other constraints still apply. `element` and `prefix` only label the
    /// diagnostics.
    ///
    /// ```rust
    /// use gsap_attr_core::{Attributes, ConstraintSet, ElementDirectives};
    ///
    /// let element = Attributes::new("div")
    ///     .with("gsap-max", "x: 50")
    ///     .with("gsap-min", "{x: }");
    /// let directives = ElementDirectives::read(&element, "gsap-");
    ///
    /// let (constraints, diagnostics) =
    ///     ConstraintSet::from_directives(&directives, "div", "gsap-");
    /// assert_eq!(constraints.max.number("x"), Some(50.0));
    /// assert!(constraints.min.is_empty());
    /// assert_eq!(diagnostics.len(), 1);
    /// ```
    pub fn from_directives(
        directives: &ElementDirectives,
        element: &str,
        prefix: &str,
    ) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut parse = |name: DirectiveName| {
            parse_directive(directives, name, element, prefix, &mut diagnostics)
                .unwrap_or_default()
        };

        let constraints = Self {
            max: parse(DirectiveName::Max),
            min: parse(DirectiveName::Min),
            negative: parse(DirectiveName::Negative),
        };
        (constraints, diagnostics)
    }

    /// True when no constraint bag has any entry.
    pub fn is_empty(&self) -> bool {
        self.max.is_empty() && self.min.is_empty() && self.negative.is_empty()
    }

    /// Apply the constraints to every key of `props`.
    ///
    /// For each key, in order: clamp to `max`, clamp to `min`, then replace
    /// with `-|value|` if `negative` is boolean `true`. Clamping only happens
    /// when both sides are numbers. Because `min` runs last, it wins when
    /// `min > max`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use gsap_attr_core::{ConstraintSet, PropertyBag};
    ///
    /// let props: PropertyBag = "x: 10; y: 3".parse().unwrap();
    /// let constraints = ConstraintSet {
    ///     max: "x: 5".parse().unwrap(),
    ///     min: "x: 8".parse().unwrap(),
    ///     negative: "y: true".parse().unwrap(),
    /// };
    ///
    /// let resolved = constraints.resolve(&props);
    /// assert_eq!(resolved.number("x"), Some(8.0));
    /// assert_eq!(resolved.number("y"), Some(-3.0));
    /// ```
    pub fn resolve(&self, props: &PropertyBag) -> PropertyBag {
        if self.is_empty() {
            return props.clone();
        }

        props
            .iter()
            .map(|(key, value)| (key.to_string(), self.resolve_one(key, value)))
            .collect()
    }

    fn resolve_one(&self, key: &str, value: &PropValue) -> PropValue {
        let Some(mut n) = value.as_number() else {
            return value.clone();
        };

        if let Some(max) = self.max.number(key) {
            n = n.min(max);
        }
        if let Some(min) = self.min.number(key) {
            n = n.max(min);
        }
        if self.negative.get(key) == Some(&PropValue::Bool(true)) {
            n = -n.abs();
        }

        PropValue::Number(n)
    }
}
