//! Dashboard variants.
//!
//! A variant fixes the dataset seed policy, the navigation chrome and the
//! visual theme. All three variants share the same layout and data model.

use std::fmt;
use std::str::FromStr;

use dashboard_data::SeedPolicy;
use serde::Serialize;
use utoipa::ToSchema;

/// Seed used by the styled variant so every session sees the same numbers.
pub const STYLED_SEED: u64 = 42;

/// Dashboard flavour selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Bare template with sidebar navigation.
    Template,
    /// Analytics dashboard with sidebar navigation.
    #[default]
    Analytics,
    /// Seeded, styled dashboard with header navigation.
    Styled,
}

/// Placement of the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Chrome {
    /// Navigation rendered in a sidebar.
    Sidebar,
    /// Navigation rendered in the page header.
    Header,
}

/// Visual styling family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStyle {
    /// Default framework styling.
    Plain,
    /// Custom gradients and card styling.
    Styled,
}

/// Light or dark colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

/// Resolved theme for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Styling family fixed by the variant.
    pub style: ThemeStyle,
    /// Colour scheme chosen by the dark mode control.
    pub mode: ColourMode,
}

/// Error returned when a variant name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dashboard variant '{value}'; expected template|analytics|styled")]
pub struct VariantParseError {
    /// Rejected input.
    pub value: String,
}

impl Variant {
    /// Every variant, in documentation order.
    pub const ALL: [Self; 3] = [Self::Template, Self::Analytics, Self::Styled];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Analytics => "analytics",
            Self::Styled => "styled",
        }
    }

    /// Seed policy for datasets rendered by this variant.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Variant;
    /// use dashboard_data::SeedPolicy;
    ///
    /// assert_eq!(Variant::Styled.seed_policy(), SeedPolicy::Fixed(42));
    /// assert_eq!(Variant::Analytics.seed_policy(), SeedPolicy::Unseeded);
    /// ```
    #[must_use]
    pub const fn seed_policy(self) -> SeedPolicy {
        match self {
            Self::Styled => SeedPolicy::Fixed(STYLED_SEED),
            Self::Template | Self::Analytics => SeedPolicy::Unseeded,
        }
    }

    /// Navigation chrome for this variant.
    #[must_use]
    pub const fn chrome(self) -> Chrome {
        match self {
            Self::Styled => Chrome::Header,
            Self::Template | Self::Analytics => Chrome::Sidebar,
        }
    }

    /// Theme for this variant under the given dark mode toggle.
    #[must_use]
    pub const fn theme(self, dark_mode: bool) -> Theme {
        let style = match self {
            Self::Styled => ThemeStyle::Styled,
            Self::Template | Self::Analytics => ThemeStyle::Plain,
        };
        let mode = if dark_mode {
            ColourMode::Dark
        } else {
            ColourMode::Light
        };
        Theme { style, mode }
    }

    /// Page title shown in the header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Template => "My Dashboard App",
            Self::Analytics => "Analytics Dashboard",
            Self::Styled => "Business Insights",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| VariantParseError {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("template", Variant::Template)]
    #[case("Analytics", Variant::Analytics)]
    #[case(" styled ", Variant::Styled)]
    fn parses_names(#[case] raw: &str, #[case] expected: Variant) {
        assert_eq!(raw.parse::<Variant>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "neon".parse::<Variant>().expect_err("unknown variant");
        assert_eq!(err.value, "neon");
    }

    #[rstest]
    #[case(Variant::Template, Chrome::Sidebar, ThemeStyle::Plain)]
    #[case(Variant::Analytics, Chrome::Sidebar, ThemeStyle::Plain)]
    #[case(Variant::Styled, Chrome::Header, ThemeStyle::Styled)]
    fn variant_fixes_chrome_and_style(
        #[case] variant: Variant,
        #[case] chrome: Chrome,
        #[case] style: ThemeStyle,
    ) {
        assert_eq!(variant.chrome(), chrome);
        assert_eq!(variant.theme(false).style, style);
    }

    #[test]
    fn dark_mode_selects_dark_colours() {
        assert_eq!(Variant::Analytics.theme(true).mode, ColourMode::Dark);
        assert_eq!(Variant::Analytics.theme(false).mode, ColourMode::Light);
    }

    #[test]
    fn only_styled_variant_is_seeded() {
        let seeded: Vec<_> = Variant::ALL
            .into_iter()
            .filter(|variant| variant.seed_policy().is_reproducible())
            .collect();
        assert_eq!(seeded, vec![Variant::Styled]);
    }
}
