//! Completion certificate
//!
//! After a run the player can type a name and get a certificate image: the
//! template picture with name, score and date written at fixed relative
//! positions. Layout and validation are platform-neutral; the canvas export
//! only exists on wasm32.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Errors that can occur while producing a certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// Name was empty after trimming
    EmptyName,

    /// Canvas/image operation failed
    Canvas(String),
}

impl fmt::Display for CertificateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CertificateError::EmptyName => write!(f, "Please enter your name"),
            CertificateError::Canvas(msg) => write!(f, "Certificate canvas error: {}", msg),
        }
    }
}

impl std::error::Error for CertificateError {}

/// Where and how one line of text goes on the template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSlot {
    /// Anchor as a fraction of the template width (text is centred on it)
    pub x: f32,
    /// Baseline as a fraction of the template height
    pub y: f32,
    /// CSS font shorthand
    pub font: String,
    /// CSS color
    pub color: String,
}

impl TextSlot {
    fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            font: "bold 80px arial".to_string(),
            color: "#000".to_string(),
        }
    }
}

/// Text positions on the certificate template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateLayout {
    pub name: TextSlot,
    pub score: TextSlot,
    pub date: TextSlot,
}

impl Default for CertificateLayout {
    fn default() -> Self {
        Self {
            name: TextSlot::new(0.494, 0.69),
            score: TextSlot::new(0.5, 0.745),
            date: TextSlot::new(0.583, 0.796),
        }
    }
}

/// A line of text resolved to template pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText<'a> {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub slot: &'a TextSlot,
}

/// Validated certificate contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub name: String,
    pub score: i64,
    pub date: NaiveDate,
}

impl Certificate {
    /// Build a certificate, rejecting blank names
    pub fn new(name: &str, score: i64, date: NaiveDate) -> Result<Self, CertificateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CertificateError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            score,
            date,
        })
    }

    /// Date as printed on the certificate, e.g. "2025. 3. 7."
    pub fn date_text(&self) -> String {
        self.date.format("%Y. %-m. %-d.").to_string()
    }

    /// Resolve every text line for a template of the given pixel size
    pub fn placements<'a>(
        &self,
        layout: &'a CertificateLayout,
        width: f32,
        height: f32,
    ) -> [PlacedText<'a>; 3] {
        let place = |text: String, slot: &'a TextSlot| PlacedText {
            text,
            x: width * slot.x,
            y: height * slot.y,
            slot,
        };
        [
            place(self.name.clone(), &layout.name),
            place(self.score.to_string(), &layout.score),
            place(self.date_text(), &layout.date),
        ]
    }
}

/// Draw the certificate onto a canvas over the loaded template image and
/// return a PNG data URL
#[cfg(target_arch = "wasm32")]
pub fn render_to_canvas(
    certificate: &Certificate,
    layout: &CertificateLayout,
    template: &web_sys::HtmlImageElement,
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<String, CertificateError> {
    use wasm_bindgen::JsCast;

    let canvas_err = |e: wasm_bindgen::JsValue| CertificateError::Canvas(format!("{:?}", e));

    let (w, h) = (template.natural_width(), template.natural_height());
    if w == 0 || h == 0 {
        return Err(CertificateError::Canvas("template image not loaded".into()));
    }
    canvas.set_width(w);
    canvas.set_height(h);

    let ctx = canvas
        .get_context("2d")
        .map_err(canvas_err)?
        .ok_or_else(|| CertificateError::Canvas("no 2d context".into()))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| CertificateError::Canvas("not a 2d context".into()))?;

    ctx.draw_image_with_html_image_element_and_dw_and_dh(template, 0.0, 0.0, w as f64, h as f64)
        .map_err(canvas_err)?;
    ctx.set_text_align("center");

    for placed in certificate.placements(layout, w as f32, h as f32) {
        ctx.set_fill_style_str(&placed.slot.color);
        ctx.set_font(&placed.slot.font);
        ctx.fill_text(&placed.text, placed.x as f64, placed.y as f64)
            .map_err(canvas_err)?;
    }

    canvas.to_data_url_with_type("image/png").map_err(canvas_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(Certificate::new("", 10, date()), Err(CertificateError::EmptyName));
        assert_eq!(Certificate::new("   \t", 10, date()), Err(CertificateError::EmptyName));
        assert_eq!(CertificateError::EmptyName.to_string(), "Please enter your name");
    }

    #[test]
    fn test_name_is_trimmed() {
        let cert = Certificate::new("  Kim  ", 120, date()).unwrap();
        assert_eq!(cert.name, "Kim");
        assert_eq!(cert.date_text(), "2025. 3. 7.");
    }

    #[test]
    fn test_placements_scale_with_template() {
        let layout = CertificateLayout::default();
        let cert = Certificate::new("Lee", 85, date()).unwrap();
        let [name, score, day] = cert.placements(&layout, 1000.0, 2000.0);
        assert_eq!(name.text, "Lee");
        assert!((name.x - 494.0).abs() < 1e-3 && (name.y - 1380.0).abs() < 1e-3);
        assert_eq!(score.text, "85");
        assert!((score.x - 500.0).abs() < 1e-3 && (score.y - 1490.0).abs() < 1e-3);
        assert_eq!(day.text, "2025. 3. 7.");
        assert!((day.x - 583.0).abs() < 1e-3);
        assert_eq!(day.slot.font, "bold 80px arial");
    }

    #[test]
    fn test_layout_from_json() {
        let json = serde_json::to_string(&CertificateLayout::default()).unwrap();
        let layout: CertificateLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, CertificateLayout::default());
    }
}
