//! Site configuration
//!
//! Everything content-shaped - nav items, project records, FAQ entries,
//! contact links - deserializes from one TOML document into [`SiteConfig`].
//! The mail/phone links are carried as literal `mailto:`/`tel:` URIs and
//! never validated beyond being strings.

use serde::Deserialize;

use crate::error::Result;

/// The whole site's content
#[derive(Clone, Debug, Deserialize)]
pub struct SiteConfig {
    pub site: SiteInfo,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
    pub contact: ContactInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
}

/// One navigation link; `anchor` is an in-page `#section` reference
#[derive(Clone, Debug, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub anchor: String,
}

/// One project showcase entry
///
/// External links open in a new browsing context; `url` being absent just
/// renders a card without a link.
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub url: Option<String>,
    pub image: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Static contact URIs
#[derive(Clone, Debug, Deserialize)]
pub struct ContactInfo {
    /// A literal `mailto:` URI
    pub email: String,
    /// A literal `tel:` URI
    pub phone: String,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl SiteConfig {
    /// Parse a TOML document
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(source)?;
        for item in &config.nav {
            if !item.anchor.starts_with('#') {
                tracing::warn!(
                    label = %item.label,
                    anchor = %item.anchor,
                    "nav anchor is not an in-page reference"
                );
            }
        }
        Ok(config)
    }

    /// The content the site ships with
    pub fn sample() -> Self {
        Self::from_toml(SAMPLE_TOML).expect("sample config must parse")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::sample()
    }
}

/// The production content, embedded so the page works with no files around
const SAMPLE_TOML: &str = r##"
[site]
name = "Scratchure Technologies"
tagline = "Creating exceptional digital experiences with cutting-edge technology and innovative design"

[[nav]]
label = "Home"
anchor = "#home"

[[nav]]
label = "About"
anchor = "#about"

[[nav]]
label = "Projects"
anchor = "#projects"

[[nav]]
label = "FAQ"
anchor = "#faq"

[[nav]]
label = "Contact"
anchor = "#contact"

[[projects]]
title = "Shabella"
description = "A full-featured fashion e-commerce platform with curated collections and a streamlined checkout"
category = "E-commerce"
url = "https://shabella.example"
image = "assets/projects/shabella.jpg"
logo = "assets/projects/shabella-logo.png"

[[projects]]
title = "POS Walla"
description = "Point of sale software for small retailers: inventory, billing, and daily reports in one place"
category = "Software"
url = "https://poswalla.example"
image = "assets/projects/pos-walla.jpg"

[[projects]]
title = "Play Photo Creation"
description = "A photography portfolio with gallery-first navigation and fast image delivery"
category = "Portfolio"
image = "assets/projects/play-photo.jpg"

[[projects]]
title = "Hiranyam Ayurveda"
description = "An ayurvedic products storefront with subscription orders and regional shipping"
category = "E-commerce"
url = "https://hiranyam.example"
image = "assets/projects/hiranyam.jpg"
logo = "assets/projects/hiranyam-logo.png"

[[faq]]
question = "What services do Scratchure Technologies offer?"
answer = "We offer comprehensive web development, e-commerce solutions, Point of Sale software, and custom software development."

[[faq]]
question = "How long does it take to develop a website?"
answer = "A basic website typically takes 2-4 weeks, while complex e-commerce platforms or custom software can take 6-12 weeks."

[[faq]]
question = "Do you provide ongoing support and maintenance?"
answer = "Yes, we offer support and maintenance packages covering security updates, performance optimization, and content updates."

[[faq]]
question = "What is your pricing structure?"
answer = "Our pricing is project-based and depends on scope, complexity, and timeline. We provide transparent quotes with no hidden costs."

[contact]
email = "mailto:hello@scratchure.example"
phone = "tel:+911234567890"
instagram = "https://instagram.com/scratchure"
linkedin = "https://linkedin.com/company/scratchure"
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let config = SiteConfig::sample();
        assert_eq!(config.site.name, "Scratchure Technologies");
        assert_eq!(config.nav.len(), 5);
        assert_eq!(config.projects.len(), 4);
        assert!(config.faq.len() >= 4);
        assert!(config.contact.email.starts_with("mailto:"));
        assert!(config.contact.phone.starts_with("tel:"));
    }

    #[test]
    fn test_optional_project_fields() {
        let config = SiteConfig::sample();
        let pos_walla = &config.projects[1];
        assert!(pos_walla.url.is_some());
        assert!(pos_walla.logo.is_none());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let result = SiteConfig::from_toml("this is not toml [");
        assert!(matches!(result, Err(crate::error::VerveError::Config(_))));
    }

    #[test]
    fn test_minimal_config() {
        let config = SiteConfig::from_toml(
            r#"
            [site]
            name = "Acme"
            tagline = "We make things"

            [contact]
            email = "mailto:acme@example.com"
            phone = "tel:+10000000000"
            "#,
        )
        .unwrap();
        assert!(config.nav.is_empty());
        assert!(config.projects.is_empty());
    }
}
