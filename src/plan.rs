//! Engine-agnostic animation commands.

use crate::config::ScrollDefaults;
use crate::{PropValue, PropertyBag};

/// Direction of a tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenKind {
    /// Animate from the current state to `vars`
    To,
    /// Animate from `vars` to the current state
    From,
}

/// A single tween on the element.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub kind: TweenKind,
    pub vars: PropertyBag,
}

/// A timeline with the tweens appended to it, played once built.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelinePlan {
    /// Timeline options (`repeat`, `yoyo`, ...)
    pub vars: PropertyBag,
    pub steps: Vec<Tween>,
}

/// Scroll activation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollTrigger {
    pub start: String,
    pub end: String,
    pub toggle_actions: String,
    pub markers: bool,
}

impl ScrollTrigger {
    pub const START: &'static str = "start";
    pub const END: &'static str = "end";
    pub const TOGGLE_ACTIONS: &'static str = "toggleActions";
    pub const MARKERS: &'static str = "markers";

    /// Move the trigger keys out of `vars`, filling gaps from `defaults`.
    ///
    /// What is left in `vars` afterwards are the tween properties.
    ///
    /// ```rust
    /// use gsap_attr_core::{PropertyBag, ScrollDefaults, ScrollTrigger};
    ///
    /// let mut vars: PropertyBag = "start: top center; opacity: 0; markers: true".parse().unwrap();
    /// let trigger = ScrollTrigger::take_from(&mut vars, &ScrollDefaults::default());
    ///
    /// assert_eq!(trigger.start, "top center");
    /// assert_eq!(trigger.end, "bottom top");
    /// assert!(trigger.markers);
    /// assert_eq!(vars.to_string(), "opacity: 0");
    /// ```
    pub fn take_from(vars: &mut PropertyBag, defaults: &ScrollDefaults) -> Self {
        let mut text = |key: &str, fallback: &str| match vars.remove(key) {
            Some(PropValue::Text(s)) if !s.is_empty() => s,
            Some(PropValue::Text(_)) | None => fallback.to_string(),
            Some(other) => other.to_string(),
        };

        let start = text(Self::START, &defaults.start);
        let end = text(Self::END, &defaults.end);
        let toggle_actions = text(Self::TOGGLE_ACTIONS, &defaults.toggle_actions);

        let markers = match vars.remove(Self::MARKERS) {
            Some(PropValue::Bool(b)) => b,
            Some(PropValue::Text(s)) => s == "true",
            _ => false,
        };

        Self {
            start,
            end,
            toggle_actions,
            markers,
        }
    }
}

/// A `from` tween activated by scrolling.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTween {
    pub trigger: ScrollTrigger,
    pub vars: PropertyBag,
}

/// One engine call, or group of calls for a timeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Tween(Tween),
    Timeline(TimelinePlan),
    Scroll(ScrollTween),
}

/// Everything to run for one element, in dispatch order.
///
/// This is a plain-data description; each backend interprets it through
/// [`AnimationEngine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationPlan {
    pub commands: Vec<Command>,
}

impl AnimationPlan {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of tweens the plan creates, counting timeline steps.
    pub fn tween_count(&self) -> usize {
        self.commands
            .iter()
            .map(|command| match command {
                Command::Tween(_) | Command::Scroll(_) => 1,
                Command::Timeline(plan) => plan.steps.len(),
            })
            .sum()
    }

    /// Run the plan against `engine` for `target`.
    ///
    /// Timelines are built in order but only played after every other
    /// command has been issued.
    pub fn apply<A: AnimationEngine>(&self, target: &A::Target, engine: &mut A) {
        let mut timelines = Vec::new();

        for command in &self.commands {
            match command {
                Command::Tween(tween) => engine.tween(target, tween.kind, &tween.vars),
                Command::Timeline(plan) => {
                    let mut timeline = engine.timeline(&plan.vars);
                    for step in &plan.steps {
                        engine.timeline_tween(&mut timeline, target, step.kind, &step.vars);
                    }
                    timelines.push(timeline);
                }
                Command::Scroll(scroll) => {
                    engine.scroll_tween(target, &scroll.trigger, &scroll.vars)
                }
            }
        }

        for timeline in timelines {
            engine.play(timeline);
        }
    }
}

/// The external animation engine.
pub trait AnimationEngine {
    /// Element type the engine animates.
    type Target: ?Sized;
    /// Handle to a timeline under construction.
    type Timeline;

    /// Immediate standalone tween.
    fn tween(&mut self, target: &Self::Target, kind: TweenKind, vars: &PropertyBag);

    /// Create a paused timeline.
    fn timeline(&mut self, vars: &PropertyBag) -> Self::Timeline;

    /// Append a tween to a timeline.
    fn timeline_tween(
        &mut self,
        timeline: &mut Self::Timeline,
        target: &Self::Target,
        kind: TweenKind,
        vars: &PropertyBag,
    );

    fn play(&mut self, timeline: Self::Timeline);

    /// `from` tween that runs when `trigger` activates.
    fn scroll_tween(&mut self, target: &Self::Target, trigger: &ScrollTrigger, vars: &PropertyBag);
}

/// Browser backend driving the global `gsap` object.
///
/// The host page is expected to load gsap and register its ScrollTrigger
/// plugin before calling into this crate.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use js_sys::{Object, Reflect};
    use wasm_bindgen::prelude::*;
    use web_sys::Element;

    #[wasm_bindgen]
    extern "C" {
        /// A gsap timeline instance.
        pub type GsapTimeline;

        #[wasm_bindgen(js_namespace = gsap, js_name = to)]
        fn gsap_to(target: &Element, vars: &JsValue);

        #[wasm_bindgen(js_namespace = gsap, js_name = from)]
        fn gsap_from(target: &Element, vars: &JsValue);

        #[wasm_bindgen(js_namespace = gsap, js_name = timeline)]
        fn gsap_timeline(vars: &JsValue) -> GsapTimeline;

        #[wasm_bindgen(method, js_name = to)]
        fn tween_to(this: &GsapTimeline, target: &Element, vars: &JsValue);

        #[wasm_bindgen(method, js_name = from)]
        fn tween_from(this: &GsapTimeline, target: &Element, vars: &JsValue);

        #[wasm_bindgen(method, js_name = play)]
        fn start(this: &GsapTimeline);
    }

    /// Convert a property bag into a plain JS object.
    pub fn to_js_object(vars: &PropertyBag) -> Object {
        let obj = Object::new();
        for (key, value) in vars.iter() {
            let js = match value {
                PropValue::Bool(b) => JsValue::from_bool(*b),
                PropValue::Number(n) => JsValue::from_f64(*n),
                PropValue::Text(s) => JsValue::from_str(s),
            };
            set(&obj, key, &js);
        }
        obj
    }

    fn set(obj: &Object, key: &str, value: &JsValue) {
        if Reflect::set(obj, &JsValue::from_str(key), value).is_err() {
            log::warn!("could not set `{}` on animation vars", key);
        }
    }

    /// [`AnimationEngine`] over the page's gsap instance.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct GsapEngine;

    impl AnimationEngine for GsapEngine {
        type Target = Element;
        type Timeline = GsapTimeline;

        fn tween(&mut self, target: &Element, kind: TweenKind, vars: &PropertyBag) {
            let vars = to_js_object(vars);
            match kind {
                TweenKind::To => gsap_to(target, &vars),
                TweenKind::From => gsap_from(target, &vars),
            }
        }

        fn timeline(&mut self, vars: &PropertyBag) -> GsapTimeline {
            gsap_timeline(&to_js_object(vars))
        }

        fn timeline_tween(
            &mut self,
            timeline: &mut GsapTimeline,
            target: &Element,
            kind: TweenKind,
            vars: &PropertyBag,
        ) {
            let vars = to_js_object(vars);
            match kind {
                TweenKind::To => timeline.tween_to(target, &vars),
                TweenKind::From => timeline.tween_from(target, &vars),
            }
        }

        fn play(&mut self, timeline: GsapTimeline) {
            timeline.start();
        }

        fn scroll_tween(&mut self, target: &Element, trigger: &ScrollTrigger, vars: &PropertyBag) {
            let scroll = Object::new();
            set(&scroll, "trigger", target.as_ref());
            set(&scroll, ScrollTrigger::START, &JsValue::from_str(&trigger.start));
            set(&scroll, ScrollTrigger::END, &JsValue::from_str(&trigger.end));
            set(
                &scroll,
                ScrollTrigger::TOGGLE_ACTIONS,
                &JsValue::from_str(&trigger.toggle_actions),
            );
            set(&scroll, ScrollTrigger::MARKERS, &JsValue::from_bool(trigger.markers));

            let vars = to_js_object(vars);
            set(&vars, "scrollTrigger", scroll.as_ref());
            gsap_from(target, &vars);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records engine calls as strings.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        timelines: usize,
    }

    impl AnimationEngine for Recorder {
        type Target = str;
        type Timeline = usize;

        fn tween(&mut self, target: &str, kind: TweenKind, vars: &PropertyBag) {
            self.calls.push(format!("{:?}({}) {}", kind, target, vars));
        }

        fn timeline(&mut self, vars: &PropertyBag) -> usize {
            self.timelines += 1;
            self.calls.push(format!("timeline#{} {}", self.timelines, vars));
            self.timelines
        }

        fn timeline_tween(
            &mut self,
            timeline: &mut usize,
            target: &str,
            kind: TweenKind,
            vars: &PropertyBag,
        ) {
            self.calls
                .push(format!("timeline#{}.{:?}({}) {}", timeline, kind, target, vars));
        }

        fn play(&mut self, timeline: usize) {
            self.calls.push(format!("timeline#{}.play", timeline));
        }

        fn scroll_tween(&mut self, target: &str, trigger: &ScrollTrigger, vars: &PropertyBag) {
            self.calls
                .push(format!("scroll({}) [{}] {}", target, trigger.start, vars));
        }
    }

    fn bag(raw: &str) -> PropertyBag {
        raw.parse().unwrap()
    }

    #[test]
    fn test_apply_plays_timeline_last() {
        let plan = AnimationPlan {
            commands: vec![
                Command::Timeline(TimelinePlan {
                    vars: bag("repeat: 1"),
                    steps: vec![
                        Tween {
                            kind: TweenKind::From,
                            vars: bag("y: 20"),
                        },
                        Tween {
                            kind: TweenKind::To,
                            vars: bag("x: 5"),
                        },
                    ],
                }),
                Command::Scroll(ScrollTween {
                    trigger: ScrollTrigger::take_from(
                        &mut PropertyBag::new(),
                        &ScrollDefaults::default(),
                    ),
                    vars: bag("opacity: 0"),
                }),
            ],
        };

        let mut engine = Recorder::default();
        plan.apply("box", &mut engine);

        assert_eq!(
            engine.calls,
            vec![
                "timeline#1 repeat: 1",
                "timeline#1.From(box) y: 20",
                "timeline#1.To(box) x: 5",
                "scroll(box) [top bottom] opacity: 0",
                "timeline#1.play",
            ]
        );
        assert_eq!(plan.tween_count(), 3);
    }

    #[test]
    fn test_apply_standalone() {
        let plan = AnimationPlan {
            commands: vec![Command::Tween(Tween {
                kind: TweenKind::To,
                vars: bag("x: 1"),
            })],
        };
        let mut engine = Recorder::default();
        plan.apply("el", &mut engine);
        assert_eq!(engine.calls, vec!["To(el) x: 1"]);
        assert_eq!(engine.timelines, 0);
    }

    #[test]
    fn test_empty_plan_makes_no_calls() {
        let plan = AnimationPlan::default();
        let mut engine = Recorder::default();
        plan.apply("el", &mut engine);
        assert!(plan.is_empty());
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn test_scroll_trigger_defaults() {
        let mut vars = bag("duration: 1");
        let trigger = ScrollTrigger::take_from(&mut vars, &ScrollDefaults::default());
        assert_eq!(
            trigger,
            ScrollTrigger {
                start: "top bottom".into(),
                end: "bottom top".into(),
                toggle_actions: "play none none reverse".into(),
                markers: false,
            }
        );
        assert_eq!(vars.to_string(), "duration: 1");
    }

    #[test]
    fn test_scroll_trigger_overrides() {
        let mut vars = bag(concat!(
            r#"{start: "top 80%", end: 300, "#,
            r#"toggleActions: "play pause resume reset", markers: "true"}"#
        ));
        let trigger = ScrollTrigger::take_from(&mut vars, &ScrollDefaults::default());
        assert_eq!(trigger.start, "top 80%");
        assert_eq!(trigger.end, "300");
        assert_eq!(trigger.toggle_actions, "play pause resume reset");
        assert!(trigger.markers);
        assert!(vars.is_empty());
    }
}
