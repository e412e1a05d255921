//! Directive names and element attribute access.

use std::fmt;

/// The fixed set of recognized directives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveName {
    /// Opens a timeline that `to`/`from` append into
    Timeline,
    /// Animate towards the given properties
    To,
    /// Animate from the given properties
    From,
    /// Scroll-triggered `from` animation
    Scroll,
    /// Ease applied to `to` and `scroll` animations
    Ease,
    /// Upper bounds per property
    Max,
    /// Lower bounds per property
    Min,
    /// Properties forced negative
    Negative,
}

impl DirectiveName {
    pub const ALL: [DirectiveName; 8] = [
        DirectiveName::Timeline,
        DirectiveName::To,
        DirectiveName::From,
        DirectiveName::Scroll,
        DirectiveName::Ease,
        DirectiveName::Max,
        DirectiveName::Min,
        DirectiveName::Negative,
    ];

    /// Directives that cause an element to be animated.
    pub const PRIMARY: [DirectiveName; 4] = [
        DirectiveName::Timeline,
        DirectiveName::To,
        DirectiveName::From,
        DirectiveName::Scroll,
    ];

    /// Attribute name without the prefix (`tl`, `to`, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            DirectiveName::Timeline => "tl",
            DirectiveName::To => "to",
            DirectiveName::From => "from",
            DirectiveName::Scroll => "scroll",
            DirectiveName::Ease => "ease",
            DirectiveName::Max => "max",
            DirectiveName::Min => "min",
            DirectiveName::Negative => "negative",
        }
    }

    /// Look up a directive by its un-prefixed attribute name.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.suffix() == suffix)
    }

    /// Full attribute name for the given prefix.
    ///
    /// ```rust
    /// use gsap_attr_core::DirectiveName;
    ///
    /// assert_eq!(DirectiveName::Timeline.attribute("gsap-"), "gsap-tl");
    /// ```
    pub fn attribute(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.suffix())
    }
}

impl fmt::Display for DirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One attribute read off an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub name: DirectiveName,
    pub raw: String,
}

/// Read access to the attributes of one element.
///
/// Implemented for `web_sys::Element` with the `web` feature and by
/// [`Attributes`] for hosts without a DOM.
pub trait AttributeSource {
    /// Value of the named attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Names of all attributes on the element.
    fn attribute_names(&self) -> Vec<String>;

    /// Short human-readable label used in diagnostics.
    fn label(&self) -> String {
        "<element>".to_string()
    }
}

/// In-memory attribute list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    label: String,
    attrs: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list labelled `label` (e.g. `div#hero`).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attrs: Vec::new(),
        }
    }

    /// Builder-style [`Attributes::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, replacing an existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }
}

impl AttributeSource for Attributes {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attrs.iter().map(|(n, _)| n.clone()).collect()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Raw values of every recognized directive on one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementDirectives {
    pub timeline: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub scroll: Option<String>,
    pub ease: Option<String>,
    pub max: Option<String>,
    pub min: Option<String>,
    pub negative: Option<String>,
}

impl ElementDirectives {
    /// Read all recognized attributes using `prefix`.
    pub fn read<E: AttributeSource + ?Sized>(element: &E, prefix: &str) -> Self {
        let get = |name: DirectiveName| element.attribute(&name.attribute(prefix));
        Self {
            timeline: get(DirectiveName::Timeline),
            to: get(DirectiveName::To),
            from: get(DirectiveName::From),
            scroll: get(DirectiveName::Scroll),
            ease: get(DirectiveName::Ease),
            max: get(DirectiveName::Max),
            min: get(DirectiveName::Min),
            negative: get(DirectiveName::Negative),
        }
    }

    /// Raw value for a directive.
    pub fn get(&self, name: DirectiveName) -> Option<&str> {
        let slot = match name {
            DirectiveName::Timeline => &self.timeline,
            DirectiveName::To => &self.to,
            DirectiveName::From => &self.from,
            DirectiveName::Scroll => &self.scroll,
            DirectiveName::Ease => &self.ease,
            DirectiveName::Max => &self.max,
            DirectiveName::Min => &self.min,
            DirectiveName::Negative => &self.negative,
        };
        slot.as_deref()
    }

    /// Raw value for a directive, or `None` when absent or blank.
    pub fn non_blank(&self, name: DirectiveName) -> Option<&str> {
        self.get(name).filter(|raw| !raw.trim().is_empty())
    }

    /// All present directives, in [`DirectiveName::ALL`] order.
    pub fn directives(&self) -> Vec<Directive> {
        DirectiveName::ALL
            .into_iter()
            .filter_map(|name| {
                self.get(name).map(|raw| Directive {
                    name,
                    raw: raw.to_string(),
                })
            })
            .collect()
    }

    /// Whether any directive that triggers an animation is set.
    pub fn has_primary(&self) -> bool {
        DirectiveName::PRIMARY
            .into_iter()
            .any(|name| self.non_blank(name).is_some())
    }
}

#[cfg(feature = "web")]
impl AttributeSource for web_sys::Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn attribute_names(&self) -> Vec<String> {
        self.get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .collect()
    }

    fn label(&self) -> String {
        let mut label = self.tag_name().to_lowercase();
        let id = self.id();
        if !id.is_empty() {
            label.push('#');
            label.push_str(&id);
        }
        label
    }
}
