//! Hitbox collision for the basket and falling entities
//!
//! Sprites are mostly transparent around the edges, so every entity class
//! collides with a centred rectangle smaller than its drawn box. Two
//! entities collide when their shrunk boxes overlap on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge don't overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Centred sub-rectangle scaled by the given factors
    pub fn shrink(&self, factors: ShrinkFactors) -> Rect {
        let w = self.w * factors.width;
        let h = self.h * factors.height;
        Rect {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }
}

/// Per-axis hitbox scale relative to the sprite box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShrinkFactors {
    pub width: f32,
    pub height: f32,
}

/// Entity classes that take part in collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitboxClass {
    Player,
    Egg,
    Item,
}

impl HitboxClass {
    /// Static shrink table
    pub const fn factors(self) -> ShrinkFactors {
        match self {
            HitboxClass::Player => ShrinkFactors { width: 0.49, height: 0.49 },
            HitboxClass::Egg => ShrinkFactors { width: 0.5, height: 0.8 },
            HitboxClass::Item => ShrinkFactors { width: 0.6, height: 0.6 },
        }
    }
}

/// Anything with a sprite box and a hitbox class
pub trait Collider {
    /// Full sprite bounds
    fn bounds(&self) -> Rect;

    fn hitbox_class(&self) -> HitboxClass;

    /// Shrunk collision rectangle
    fn hitbox(&self) -> Rect {
        self.bounds().shrink(self.hitbox_class().factors())
    }
}

/// Check whether two colliders' hitboxes overlap
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    a.hitbox().overlaps(&b.hitbox())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Boxed(Rect, HitboxClass);

    impl Collider for Boxed {
        fn bounds(&self) -> Rect {
            self.0
        }
        fn hitbox_class(&self) -> HitboxClass {
            self.1
        }
    }

    #[test]
    fn test_shrink_is_centred() {
        let r = Rect::new(100.0, 200.0, 140.0, 140.0);
        let hb = r.shrink(HitboxClass::Player.factors());
        assert!((hb.w - 68.6).abs() < 1e-4);
        assert!((hb.center() - r.center()).length() < 1e-4);

        let egg = Rect::new(0.0, 0.0, 80.0, 80.0).shrink(HitboxClass::Egg.factors());
        assert_eq!(egg, Rect::new(20.0, 8.0, 40.0, 64.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(9.9, 9.9, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_sprite_overlap_without_hitbox_overlap() {
        // Basket sprite at x=0..140, egg sprite at x=130..210: sprites overlap
        // by 10px but the hitboxes (35.7..104.3 and 150..190) don't.
        let player = Boxed(Rect::new(0.0, 0.0, 140.0, 140.0), HitboxClass::Player);
        let egg = Boxed(Rect::new(130.0, 30.0, 80.0, 80.0), HitboxClass::Egg);
        assert!(player.bounds().overlaps(&egg.bounds()));
        assert!(!collides(&player, &egg));
    }

    #[test]
    fn test_centred_egg_collides() {
        let player = Boxed(Rect::new(170.0, 600.0, 140.0, 140.0), HitboxClass::Player);
        let egg = Boxed(Rect::new(200.0, 630.0, 80.0, 80.0), HitboxClass::Egg);
        assert!(collides(&player, &egg));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let a = Boxed(Rect::new(ax, ay, 140.0, 140.0), HitboxClass::Player);
            let b = Boxed(Rect::new(bx, by, 60.0, 60.0), HitboxClass::Item);
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn prop_hitbox_inside_sprite(
            x in -500.0f32..500.0, y in -500.0f32..500.0, s in 1.0f32..300.0,
        ) {
            for class in [HitboxClass::Player, HitboxClass::Egg, HitboxClass::Item] {
                let b = Boxed(Rect::new(x, y, s, s), class);
                let hb = b.hitbox();
                prop_assert!(hb.x >= b.0.x - 1e-3 && hb.right() <= b.0.right() + 1e-3);
                prop_assert!(hb.y >= b.0.y - 1e-3 && hb.bottom() <= b.0.bottom() + 1e-3);
            }
        }
    }
}
