/// Fallback values for scroll-triggered animations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollDefaults {
    pub start: String,
    pub end: String,
    pub toggle_actions: String,
}

impl Default for ScrollDefaults {
    fn default() -> Self {
        Self {
            start: "top bottom".to_string(),
            end: "bottom top".to_string(),
            toggle_actions: "play none none reverse".to_string(),
        }
    }
}

/// Settings for a binding pass.
///
/// Every field has a default, so a partial `binding.toml` is enough:
///
/// ```toml
/// default_ease = "expo.out"
///
/// [scroll]
/// start = "top 80%"
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BindingConfig {
    /// Attribute prefix shared by all directives
    pub attribute_prefix: String,
    /// Ease used when an element has no `ease` directive
    pub default_ease: String,
    pub scroll: ScrollDefaults,
    /// Emit a diagnostic for prefixed attributes that are not directives
    pub report_unknown_attributes: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            attribute_prefix: "gsap-".to_string(),
            default_ease: "power1.out".to_string(),
            scroll: ScrollDefaults::default(),
            report_unknown_attributes: true,
        }
    }
}

impl BindingConfig {
    /// Parse a TOML string into `BindingConfig`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// CSS selector matching elements that carry any recognized directive.
    ///
    /// ```rust
    /// use gsap_attr_core::BindingConfig;
    ///
    /// assert_eq!(
    ///     BindingConfig::default().any_selector(),
    ///     "[gsap-tl], [gsap-to], [gsap-from], [gsap-scroll], \
    ///      [gsap-ease], [gsap-max], [gsap-min], [gsap-negative]"
    /// );
    /// ```
    pub fn any_selector(&self) -> String {
        crate::DirectiveName::ALL
            .iter()
            .map(|name| format!("[{}]", name.attribute(&self.attribute_prefix)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
