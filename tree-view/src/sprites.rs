//! Procedural leaf sprites for the viewer.
//!
//! The playback layer only knows sprites by variant; this module builds
//! the two variants as small textures at startup and caches them for
//! the whole session, so leaf blits never wait on asset loading.

use tree_core::playback::LeafSprite;

/// Side length of a sprite texture in pixels.
const SPRITE_SIZE: usize = 16;

/// The two cached leaf textures, selected by [`LeafSprite`] variant.
///
/// Handles must stay alive for as long as their ids are painted;
/// dropping this struct frees the textures.
pub struct LeafSprites {
    handles: [egui::TextureHandle; 2],
}

impl LeafSprites {
    /// Builds both variants and uploads them once.
    pub fn load(ctx: &egui::Context) -> Self {
        let options = egui::TextureOptions::LINEAR;
        let handles = [
            ctx.load_texture("leaf-1", leaf_image([0x6F, 0xA8, 0x3F]), options),
            ctx.load_texture("leaf-2", leaf_image([0x4C, 0x8C, 0x2E]), options),
        ];
        Self { handles }
    }

    /// Texture ids in variant order, for handing to the draw surface.
    pub fn ids(&self) -> [egui::TextureId; 2] {
        [self.handles[0].id(), self.handles[1].id()]
    }

    /// Texture id for one variant.
    pub fn id(&self, sprite: LeafSprite) -> egui::TextureId {
        match sprite {
            LeafSprite::One => self.handles[0].id(),
            LeafSprite::Two => self.handles[1].id(),
        }
    }
}

/// Renders one leaf shape: an ellipse laid along the diagonal, solid
/// fill inside and fully transparent outside.
pub(crate) fn leaf_image(rgb: [u8; 3]) -> egui::ColorImage {
    let n = SPRITE_SIZE;
    let mut rgba = vec![0u8; n * n * 4];

    for y in 0..n {
        for x in 0..n {
            // Pixel center in [-1, 1].
            let px = (x as f32 + 0.5) / n as f32 * 2.0 - 1.0;
            let py = (y as f32 + 0.5) / n as f32 * 2.0 - 1.0;

            // Rotate 45 degrees so the leaf points corner to corner.
            let u = (px + py) * std::f32::consts::FRAC_1_SQRT_2;
            let v = (py - px) * std::f32::consts::FRAC_1_SQRT_2;

            let inside = (u / 0.95).powi(2) + (v / 0.45).powi(2) <= 1.0;
            if inside {
                let i = (y * n + x) * 4;
                rgba[i] = rgb[0];
                rgba[i + 1] = rgb[1];
                rgba[i + 2] = rgb[2];
                rgba[i + 3] = 0xFF;
            }
        }
    }

    egui::ColorImage::from_rgba_unmultiplied([n, n], &rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_image_is_opaque_inside_and_clear_at_the_corners() {
        let img = leaf_image([0x6F, 0xA8, 0x3F]);
        assert_eq!(img.size, [SPRITE_SIZE, SPRITE_SIZE]);

        let at = |x: usize, y: usize| img.pixels[y * SPRITE_SIZE + x];

        // Center sits inside the ellipse.
        let center = at(SPRITE_SIZE / 2, SPRITE_SIZE / 2);
        assert!(center.a() > 0);

        // Side midpoints are off the diagonal and must be transparent.
        assert_eq!(at(0, SPRITE_SIZE / 2).a(), 0);
        assert_eq!(at(SPRITE_SIZE - 1, SPRITE_SIZE / 2).a(), 0);
    }

    #[test]
    fn load_caches_two_distinct_textures() {
        let ctx = egui::Context::default();
        let sprites = LeafSprites::load(&ctx);

        let [one, two] = sprites.ids();
        assert_ne!(one, two);
        assert_eq!(sprites.id(LeafSprite::One), one);
        assert_eq!(sprites.id(LeafSprite::Two), two);
    }
}
