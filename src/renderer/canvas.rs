//! Browser backend for the draw list

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCmd, Sprite, build_scene, fit_aspect};
use crate::platform::Renderer;
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
    settings: Settings,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading every sprite
    pub fn new(canvas: HtmlCanvasElement, settings: Settings) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("{:?}", e))?
            .ok_or("Canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Not a 2d context".to_string())?;

        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.path());
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Failed to create image for {}: {:?}", sprite.path(), e),
            }
        }

        Ok(Self {
            canvas,
            ctx,
            images,
            settings,
        })
    }

    /// Match the backing store to the CSS viewport
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn execute(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::StrokeRect { rect, color, width } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCmd::Sprite { sprite, rect } => self.draw_sprite(*sprite, *rect),
            DrawCmd::Text {
                text,
                pos,
                font,
                color,
                outline,
                centered,
            } => {
                ctx.set_font(font);
                if *centered {
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                } else {
                    ctx.set_text_align("start");
                    ctx.set_text_baseline("alphabetic");
                }
                let (x, y) = (pos.x as f64, pos.y as f64);
                if let Some(outline) = outline {
                    ctx.set_stroke_style_str(&outline.color);
                    ctx.set_line_width(outline.width as f64);
                    let _ = ctx.stroke_text(text, x, y);
                }
                ctx.set_fill_style_str(color);
                let _ = ctx.fill_text(text, x, y);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_global_alpha(*alpha as f64);
                ctx.begin_path();
                let _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
                ctx.set_global_alpha(1.0);
            }
            DrawCmd::PushTransform {
                translate,
                rotate,
                scale,
            } => {
                ctx.save();
                let _ = ctx.translate(translate.x as f64, translate.y as f64);
                if *rotate != 0.0 {
                    let _ = ctx.rotate(*rotate as f64);
                }
                let _ = ctx.scale(scale.x as f64, scale.y as f64);
            }
            DrawCmd::PopTransform => ctx.restore(),
        }
    }

    fn draw_sprite(&self, sprite: Sprite, rect: Rect) {
        let Some(img) = self.images.get(&sprite) else {
            return;
        };
        // Skipped until the image has loaded
        let Some(fitted) = fit_aspect(img.natural_width() as f32, img.natural_height() as f32, rect)
        else {
            return;
        };
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            fitted.x as f64,
            fitted.y as f64,
            fitted.w as f64,
            fitted.h as f64,
        );
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &GameState) {
        for cmd in build_scene(state, &self.settings) {
            self.execute(&cmd);
        }
    }
}
