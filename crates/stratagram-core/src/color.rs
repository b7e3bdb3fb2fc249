//! Fill colors for diagram nodes
//!
//! D2 accepts any CSS color in `style.fill`. The [`Color`] type validates
//! configured colors with the `color` crate up front while keeping the text
//! exactly as written, so `lightgreen` is emitted as `lightgreen` rather than
//! a normalized `rgb(...)` form.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A validated CSS color, kept in its original spelling.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    text: String,
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"lightgreen"`.
    ///
    /// # Errors
    ///
    /// Returns a message describing the problem if the string is not a
    /// valid CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagram_core::color::Color;
    ///
    /// let fill = Color::new("lightgreen").unwrap();
    /// assert_eq!(fill.to_string(), "lightgreen");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        match DynamicColor::from_str(trimmed) {
            Ok(color) => Ok(Self {
                text: trimmed.to_string(),
                color,
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("lightgreen").expect("'lightgreen' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
