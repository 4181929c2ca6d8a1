use palette::Srgb;
use ultraviolet::Vec2;

/// A 2D drawing target in the style of an HTML canvas context: a current
/// paint colour and a global alpha apply to every subsequent fill or stroke.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Change the surface dimensions. Implementations may discard their
    /// contents, as a canvas does when its size is reassigned.
    fn resize(&mut self, width: f32, height: f32);

    fn set_color(&mut self, color: Srgb<u8>);
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    /// Fill a closed polygon; the last point connects back to the first.
    fn fill_polygon(&mut self, points: &[Vec2]);
    /// Stroke a quadratic Bézier curve in the current colour.
    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, line_width: f32);
}
