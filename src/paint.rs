use crate::color::Color;

/// Drawing seam implemented by the GUI's 2D surface.
pub trait Painter {
  fn set_color(&mut self, color: &Color);
  fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
  fn draw_text(&mut self, x: i32, y: i32, text: &str);
}
