//! Position + sprite capability shared by everything drawn in the world

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::assets::{Sprite, SpriteSizes};
use crate::error::AssetLookupError;
use crate::renderer::Canvas;

/// A sprite placed in the world, centered on `position`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub sprite: Sprite,
}

impl Body {
    pub fn new(position: Vec2, sprite: Sprite) -> Self {
        Self { position, sprite }
    }

    pub fn size(&self, sizes: &dyn SpriteSizes) -> Result<Vec2, AssetLookupError> {
        sizes.sprite_size(self.sprite)
    }

    /// Full sprite box
    pub fn bounds(&self, sizes: &dyn SpriteSizes) -> Result<Rect, AssetLookupError> {
        Ok(Rect::centered(self.position, self.size(sizes)?))
    }

    /// Draw the sprite centered on the position
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        sizes: &dyn SpriteSizes,
    ) -> Result<(), AssetLookupError> {
        let size = self.size(sizes)?;
        canvas.draw_sprite(self.sprite, self.position - size / 2.0, size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteAtlas;
    use crate::renderer::RecordingCanvas;

    #[test]
    fn test_draw_centers_sprite() {
        let mut atlas = SpriteAtlas::new();
        atlas.register(Sprite::Rock1, Vec2::new(20.0, 10.0));
        let body = Body::new(Vec2::new(100.0, 50.0), Sprite::Rock1);

        let mut canvas = RecordingCanvas::new();
        body.draw(&mut canvas, &atlas).unwrap();
        assert_eq!(canvas.calls()[0].screen_pos, Vec2::new(90.0, 45.0));
        assert_eq!(
            body.bounds(&atlas).unwrap(),
            Rect::new(90.0, 45.0, 110.0, 55.0)
        );
    }

    #[test]
    fn test_draw_without_size_draws_nothing() {
        let atlas = SpriteAtlas::new();
        let body = Body::new(Vec2::ZERO, Sprite::Tree);

        let mut canvas = RecordingCanvas::new();
        assert!(body.draw(&mut canvas, &atlas).is_err());
        assert!(canvas.calls().is_empty());
    }
}
