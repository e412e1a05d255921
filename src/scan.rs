//! Element scanning, validation and dispatch.

use std::fmt;

use log::{trace, warn};
use thiserror::Error;

use crate::plan::{
    AnimationEngine, AnimationPlan, Command, ScrollTrigger, ScrollTween, TimelinePlan, Tween,
    TweenKind,
};
use crate::{
    parse_value, AttributeSource, BindingConfig, ConstraintSet, DirectiveName, ElementDirectives,
    ParseError, PropertyBag,
};

/// What went wrong on an element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// Prefixed attribute that is not a known directive
    #[error("invalid animation attribute `{attribute}`")]
    UnknownAttribute { attribute: String },
    /// Directive value that could not be parsed; the directive is dropped
    #[error("invalid value for `{attribute}` ({value:?}): {error}")]
    MalformedValue {
        attribute: String,
        value: String,
        #[source]
        error: ParseError,
    },
}

/// A non-fatal problem found while binding an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Label of the offending element
    pub element: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind, self.element)
    }
}

/// Parse a non-blank directive, recording a diagnostic if it is malformed.
pub(crate) fn parse_directive(
    directives: &ElementDirectives,
    name: DirectiveName,
    element: &str,
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<PropertyBag> {
    let raw = directives.non_blank(name)?;
    match parse_value(raw) {
        Ok(bag) => Some(bag),
        Err(error) => {
            diagnostics.push(Diagnostic {
                element: element.to_string(),
                kind: DiagnosticKind::MalformedValue {
                    attribute: name.attribute(prefix),
                    value: raw.to_string(),
                    error,
                },
            });
            None
        }
    }
}

/// Plan and diagnostics for a single element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPlan {
    pub plan: AnimationPlan,
    pub diagnostics: Vec<Diagnostic>,
}

/// Summary of a binding pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanReport {
    /// Elements carrying at least one prefixed attribute
    pub elements: usize,
    /// Tweens handed to the engine, counting timeline steps
    pub animations: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns element attributes into engine calls.
///
/// ## Example
///
/// ```rust
/// use gsap_attr_core::{Attributes, Binder, BindingConfig, Command, PropValue};
///
/// let element = Attributes::new("div#hero")
///     .with("gsap-to", "x: 100; opacity: 0.5")
///     .with("gsap-max", "x: 50");
///
/// let binder = Binder::new(BindingConfig::default());
/// let result = binder.plan(&element);
/// assert!(result.diagnostics.is_empty());
///
/// let Command::Tween(tween) = &result.plan.commands[0] else { panic!() };
/// assert_eq!(tween.vars.number("x"), Some(50.0));
/// assert_eq!(tween.vars.number("opacity"), Some(0.5));
/// assert_eq!(tween.vars.get("ease"), Some(&PropValue::Text("power1.out".into())));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Binder {
    config: BindingConfig,
}

impl Binder {
    pub fn new(config: BindingConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Whether the element carries any prefixed attribute.
    pub fn is_decorated<E: AttributeSource + ?Sized>(&self, element: &E) -> bool {
        element
            .attribute_names()
            .iter()
            .any(|name| name.starts_with(&self.config.attribute_prefix))
    }

    /// Report prefixed attributes that are not recognized directives.
    ///
    /// Attributes without the prefix are never reported.
    pub fn validate<E: AttributeSource + ?Sized>(&self, element: &E) -> Vec<Diagnostic> {
        if !self.config.report_unknown_attributes {
            return Vec::new();
        }

        element
            .attribute_names()
            .into_iter()
            .filter(|name| {
                name.strip_prefix(&self.config.attribute_prefix)
                    .is_some_and(|suffix| DirectiveName::from_suffix(suffix).is_none())
            })
            .map(|attribute| Diagnostic {
                element: element.label(),
                kind: DiagnosticKind::UnknownAttribute { attribute },
            })
            .collect()
    }

    /// Parse, constrain and dispatch-order the directives of one element.
    ///
    /// Blank directives are treated as absent. A directive whose value
    /// cannot be parsed is dropped with a diagnostic; the rest still apply.
    pub fn plan<E: AttributeSource + ?Sized>(&self, element: &E) -> ElementPlan {
        let directives = ElementDirectives::read(element, &self.config.attribute_prefix);
        if !directives.has_primary() {
            return ElementPlan::default();
        }

        let label = element.label();
        let prefix = self.config.attribute_prefix.as_str();
        for directive in directives.directives() {
            trace!("{} {}={:?}", label, directive.name, directive.raw);
        }

        let (constraints, mut diagnostics) =
            ConstraintSet::from_directives(&directives, &label, prefix);
        let mut parse = |name: DirectiveName| {
            parse_directive(&directives, name, &label, prefix, &mut diagnostics)
        };

        let ease = directives
            .non_blank(DirectiveName::Ease)
            .map(str::trim)
            .unwrap_or(self.config.default_ease.as_str())
            .to_string();

        let timeline = parse(DirectiveName::Timeline);

        let mut tweens = Vec::new();
        if let Some(vars) = parse(DirectiveName::From) {
            tweens.push(Tween {
                kind: TweenKind::From,
                vars: constraints.resolve(&vars),
            });
        }
        if let Some(vars) = parse(DirectiveName::To) {
            let mut vars = constraints.resolve(&vars);
            vars.insert("ease", ease.as_str());
            tweens.push(Tween {
                kind: TweenKind::To,
                vars,
            });
        }

        let mut commands = Vec::new();
        match timeline {
            Some(vars) => {
                commands.push(Command::Timeline(TimelinePlan { vars, steps: tweens }))
            }
            None => commands.extend(tweens.into_iter().map(Command::Tween)),
        }

        if let Some(vars) = parse(DirectiveName::Scroll) {
            let mut vars = constraints.resolve(&vars);
            let trigger = ScrollTrigger::take_from(&mut vars, &self.config.scroll);
            vars.insert("ease", ease);
            commands.push(Command::Scroll(ScrollTween { trigger, vars }));
        }

        ElementPlan {
            plan: AnimationPlan { commands },
            diagnostics,
        }
    }

    /// Validate, plan and dispatch a single element.
    ///
    /// Returns the number of tweens dispatched; diagnostics are logged and
    /// appended to `diagnostics`.
    pub fn bind<A: AnimationEngine>(
        &self,
        element: &A::Target,
        engine: &mut A,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> usize
    where
        A::Target: AttributeSource,
    {
        let mut found = self.validate(element);
        let ElementPlan {
            plan,
            diagnostics: parse_diagnostics,
        } = self.plan(element);
        found.extend(parse_diagnostics);

        for diagnostic in &found {
            warn!("{}", diagnostic);
        }
        diagnostics.extend(found);

        if plan.is_empty() {
            return 0;
        }

        trace!(
            "dispatching {} command(s) on {}",
            plan.commands.len(),
            element.label()
        );
        plan.apply(element, engine);
        plan.tween_count()
    }

    /// Run a full binding pass over `elements`.
    ///
    /// Elements without any prefixed attribute are skipped. Nothing here
    /// aborts the pass; every problem ends up in the report. Running the
    /// pass again re-dispatches every animation.
    pub fn apply_all<'a, A, I>(&self, elements: I, engine: &mut A) -> ScanReport
    where
        A: AnimationEngine,
        A::Target: AttributeSource + 'a,
        I: IntoIterator<Item = &'a A::Target>,
    {
        let mut report = ScanReport::default();

        for element in elements {
            if !self.is_decorated(element) {
                continue;
            }
            report.elements += 1;
            report.animations += self.bind(element, engine, &mut report.diagnostics);
        }

        report
    }
}

/// Browser entry points.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::plan::web::GsapEngine;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::Element;

    /// Collect every element in the document carrying a recognized directive.
    pub fn query_elements(config: &BindingConfig) -> Result<Vec<Element>, String> {
        let window = web_sys::window().ok_or("No window available")?;
        let document = window.document().ok_or("No document available")?;
        let nodes = document
            .query_selector_all(&config.any_selector())
            .map_err(|_| "Failed to query animation elements")?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    /// Run a binding pass over the current document with `config`.
    ///
    /// Diagnostics are written to the browser console.
    pub fn apply_document(config: BindingConfig) -> Result<ScanReport, String> {
        let elements = query_elements(&config)?;
        let binder = Binder::new(config);
        let report = binder.apply_all(elements.iter(), &mut GsapEngine);

        for diagnostic in &report.diagnostics {
            web_sys::console::error_1(&JsValue::from_str(&diagnostic.to_string()));
        }

        Ok(report)
    }

    /// Bind every decorated element in the document with default settings.
    ///
    /// Returns the number of tweens dispatched.
    #[wasm_bindgen(js_name = applyAnimations)]
    pub fn apply_animations() -> Result<u32, JsError> {
        console_error_panic_hook::set_once();
        let report = apply_document(BindingConfig::default()).map_err(|e| JsError::new(&e))?;
        Ok(report.animations as u32)
    }

    /// Like `applyAnimations`, with a JSON-encoded `BindingConfig`.
    #[wasm_bindgen(js_name = applyAnimationsWith)]
    pub fn apply_animations_with(config_json: &str) -> Result<u32, JsError> {
        console_error_panic_hook::set_once();
        let config: BindingConfig = serde_json::from_str(config_json)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        let report = apply_document(config).map_err(|e| JsError::new(&e))?;
        Ok(report.animations as u32)
    }
}
