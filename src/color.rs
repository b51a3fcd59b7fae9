#[derive(Debug, Clone, PartialEq)]
pub struct Color(String);

impl Color {
  pub fn new(value: String) -> Color {
    Color(value)
  }

  pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
    Color(format!("rgb({},{},{})", r, g, b))
  }

  pub fn white() -> Color {
    Color("white".into())
  }

  pub fn get_value(&self) -> &str {
    self.0.as_str()
  }
}
