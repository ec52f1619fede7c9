//! Template, color preset, and output-format enumerations.
//!
//! These are the only knobs a caller has over the look of a document. Color is
//! meaningful only for the Modern template; the other two always render in the
//! neutral body palette.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// An sRGB color. Both renderers consume the same value: the PDF writer as
/// `rg` operands, the DOCX writer as a hex `w:color` / shading fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case hex without the leading `#`, the form DOCX expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Mixes the color toward white. `amount` 0.0 keeps the color, 1.0 is white.
    pub fn tint(&self, amount: f32) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| -> u8 { (c as f32 + (255.0 - c as f32) * amount).round() as u8 };
        Rgb::new(mix(self.r), mix(self.g), mix(self.b))
    }
}

/// Near-black used for all body text.
pub const BODY_COLOR: Rgb = Rgb::new(0x1F, 0x29, 0x37);
/// Secondary text: company/location/period lines, contact details.
pub const MUTED_COLOR: Rgb = Rgb::new(0x4B, 0x55, 0x63);

/// The six accent presets offered by the Modern template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreset {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Teal,
    Orange,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 6] = [
        ColorPreset::Blue,
        ColorPreset::Green,
        ColorPreset::Purple,
        ColorPreset::Red,
        ColorPreset::Teal,
        ColorPreset::Orange,
    ];

    pub fn rgb(&self) -> Rgb {
        match self {
            ColorPreset::Blue => Rgb::new(0x25, 0x63, 0xEB),
            ColorPreset::Green => Rgb::new(0x05, 0x96, 0x69),
            ColorPreset::Purple => Rgb::new(0x7C, 0x3A, 0xED),
            ColorPreset::Red => Rgb::new(0xDC, 0x26, 0x26),
            ColorPreset::Teal => Rgb::new(0x0D, 0x94, 0x88),
            ColorPreset::Orange => Rgb::new(0xEA, 0x58, 0x0C),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorPreset::Blue => "blue",
            ColorPreset::Green => "green",
            ColorPreset::Purple => "purple",
            ColorPreset::Red => "red",
            ColorPreset::Teal => "teal",
            ColorPreset::Orange => "orange",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Traditional,
    Ats,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Modern, Template::Traditional, Template::Ats];

    /// Display name, also used as the filename prefix.
    pub fn display_name(&self) -> &'static str {
        match self {
            Template::Modern => "Modern",
            Template::Traditional => "Traditional",
            Template::Ats => "ATS",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Traditional => "traditional",
            Template::Ats => "ats",
        }
    }
}

/// Template plus color. The color is ignored unless the template is Modern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub color: ColorPreset,
}

impl TemplateConfig {
    pub fn new(template: Template, color: ColorPreset) -> Self {
        Self { template, color }
    }

    /// Heading color for this configuration.
    pub fn accent(&self) -> Rgb {
        match self.template {
            Template::Modern => self.color.rgb(),
            Template::Traditional | Template::Ats => BODY_COLOR,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

/// `<Template>_Resume_<ISO-date>.<ext>` or `Cover_Letter_<ISO-date>.<ext>`.
pub fn document_file_name(
    kind: DocumentKind,
    template: Template,
    format: OutputFormat,
    date: NaiveDate,
) -> String {
    let date = date.format("%Y-%m-%d");
    match kind {
        DocumentKind::Resume => format!(
            "{}_Resume_{}.{}",
            template.display_name(),
            date,
            format.extension()
        ),
        DocumentKind::CoverLetter => format!("Cover_Letter_{}.{}", date, format.extension()),
    }
}
