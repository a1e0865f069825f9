//! HTML template for preview cards
//!
//! The whole visual design lives in [`Theme`]; [`render`] turns one
//! [`ImageSpec`] into a self-contained document that the browser screenshots.
//! Rendering is pure: the same spec and theme always produce the same bytes.

use sha2::{Digest, Sha256};

use crate::catalog::ImageSpec;

/// Visual constants for the card design
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Logical canvas size in CSS pixels
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    pub font_family: &'static str,
    /// Text of the top-left brand mark
    pub brand: &'static str,
    pub brand_size: u32,
    pub title_size: u32,
    pub title_color: &'static str,
    pub subtitle_size: u32,
    pub subtitle_color: &'static str,
    pub description_size: u32,
    pub description_color: &'static str,
    /// Hairline above the footer
    pub rule_color: &'static str,
    /// Text shown in the footer row
    pub domain: &'static str,
    pub domain_size: u32,
    pub domain_color: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            width: crate::OG_WIDTH,
            height: crate::OG_HEIGHT,
            background: "#0a0a0a",
            foreground: "white",
            accent: "#10b981",
            font_family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif",
            brand: "MUIN",
            brand_size: 28,
            title_size: 72,
            title_color: "#ffffff",
            subtitle_size: 36,
            subtitle_color: "#a0a0a0",
            description_size: 28,
            description_color: "#707070",
            rule_color: "#222",
            domain: "muin.company",
            domain_size: 20,
            domain_color: "#505050",
        }
    }
}

const CARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      width: {{WIDTH}}px;
      height: {{HEIGHT}}px;
      background: {{BACKGROUND}};
      font-family: {{FONT_FAMILY}};
      display: flex;
      flex-direction: column;
      justify-content: space-between;
      padding: 60px 80px;
      color: {{FOREGROUND}};
    }

    .header {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .logo {
      font-size: {{BRAND_SIZE}}px;
      font-weight: 700;
      color: {{ACCENT}};
      letter-spacing: -0.5px;
    }

    .content {
      flex: 1;
      display: flex;
      flex-direction: column;
      justify-content: center;
      gap: 20px;
      margin-top: -40px;
    }

    .title {
      font-size: {{TITLE_SIZE}}px;
      font-weight: 700;
      line-height: 1.1;
      letter-spacing: -2px;
      color: {{TITLE_COLOR}};
    }

    .subtitle {
      font-size: {{SUBTITLE_SIZE}}px;
      font-weight: 500;
      color: {{SUBTITLE_COLOR}};
      letter-spacing: -0.5px;
    }

    .description {
      font-size: {{DESCRIPTION_SIZE}}px;
      font-weight: 400;
      color: {{DESCRIPTION_COLOR}};
      margin-top: 8px;
      min-height: 1em;
    }

    .accent {
      color: {{ACCENT}};
    }

    .footer {
      display: flex;
      justify-content: space-between;
      align-items: center;
      border-top: 1px solid {{RULE_COLOR}};
      padding-top: 24px;
    }

    .domain {
      font-size: {{DOMAIN_SIZE}}px;
      color: {{DOMAIN_COLOR}};
      font-weight: 500;
    }
  </style>
</head>
<body>
  <div class="header">
    <div class="logo">{{BRAND}}</div>
  </div>

  <div class="content">
    <div class="title">{{TITLE}}</div>
    <div class="subtitle">{{SUBTITLE}}</div>
    <div class="description">{{DESCRIPTION}}</div>
  </div>

  <div class="footer">
    <div class="domain">{{DOMAIN}}</div>
  </div>
</body>
</html>"#;

/// Render a card with the default theme.
pub fn render(spec: &ImageSpec<'_>) -> String {
    render_with(&Theme::default(), spec)
}

/// Render a card against an explicit theme.
pub fn render_with(theme: &Theme, spec: &ImageSpec<'_>) -> String {
    fill(CARD_TEMPLATE, |key| {
        let value = match key {
            "WIDTH" => theme.width.to_string(),
            "HEIGHT" => theme.height.to_string(),
            "BACKGROUND" => theme.background.to_string(),
            "FOREGROUND" => theme.foreground.to_string(),
            "ACCENT" => theme.accent.to_string(),
            "FONT_FAMILY" => theme.font_family.to_string(),
            "BRAND_SIZE" => theme.brand_size.to_string(),
            "TITLE_SIZE" => theme.title_size.to_string(),
            "TITLE_COLOR" => theme.title_color.to_string(),
            "SUBTITLE_SIZE" => theme.subtitle_size.to_string(),
            "SUBTITLE_COLOR" => theme.subtitle_color.to_string(),
            "DESCRIPTION_SIZE" => theme.description_size.to_string(),
            "DESCRIPTION_COLOR" => theme.description_color.to_string(),
            "RULE_COLOR" => theme.rule_color.to_string(),
            "DOMAIN_SIZE" => theme.domain_size.to_string(),
            "DOMAIN_COLOR" => theme.domain_color.to_string(),
            "BRAND" => escape_html(theme.brand),
            "DOMAIN" => escape_html(theme.domain),
            "TITLE" => escape_html(spec.title),
            "SUBTITLE" => escape_html(spec.subtitle),
            "DESCRIPTION" => escape_html(spec.description),
            _ => return None,
        };
        Some(value)
    })
}

/// SHA-256 hex digest of a rendered document.
pub fn fingerprint(markup: &str) -> String {
    hex::encode(Sha256::digest(markup.as_bytes()))
}

// Single pass: substituted values are never rescanned for `{{...}}`.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
