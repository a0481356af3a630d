//! Value-to-colour mapping for surface cells.
//!
//! Pure functions only: a cell value and the grid maximum go in, a colour
//! comes out. Layout, labels and pixel geometry belong to the renderer.
//!
//! Two schemes are supported:
//! - [`ColourScheme::Gradient`]: continuous HSL ramp, green (low) to red (high)
//! - [`ColourScheme::Palette`]: 12-step discrete palette, one per option right

use std::fmt;
use std::str::FromStr;

use pricer_core::types::OptionType;

/// 24-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Builds a colour from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a packed `0xRRGGBB` value.
    #[inline]
    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// CSS hex form, e.g. `#4A148C`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// HSL colour: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue, degrees in [0, 360)
    pub hue: f64,
    /// Saturation, percent in [0, 100]
    pub saturation: f64,
    /// Lightness, percent in [0, 100]
    pub lightness: f64,
}

impl Hsl {
    /// Converts to sRGB.
    pub fn to_rgb(&self) -> Rgb {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Call palette: purple → blue → green → yellow.
pub const CALL_PALETTE: [Rgb; 12] = [
    Rgb::from_u32(0x4A148C),
    Rgb::from_u32(0x6A1B9A),
    Rgb::from_u32(0x7B1FA2),
    Rgb::from_u32(0x9C27B0),
    Rgb::from_u32(0x3949AB),
    Rgb::from_u32(0x1E88E5),
    Rgb::from_u32(0x039BE5),
    Rgb::from_u32(0x00ACC1),
    Rgb::from_u32(0x00897B),
    Rgb::from_u32(0x43A047),
    Rgb::from_u32(0x7CB342),
    Rgb::from_u32(0xC0CA33),
];

/// Put palette: dark green → yellow.
pub const PUT_PALETTE: [Rgb; 12] = [
    Rgb::from_u32(0x1B5E20),
    Rgb::from_u32(0x2E7D32),
    Rgb::from_u32(0x388E3C),
    Rgb::from_u32(0x43A047),
    Rgb::from_u32(0x4CAF50),
    Rgb::from_u32(0x66BB6A),
    Rgb::from_u32(0x81C784),
    Rgb::from_u32(0xA5D6A7),
    Rgb::from_u32(0xC8E6C9),
    Rgb::from_u32(0xF0F4C3),
    Rgb::from_u32(0xE6EE9C),
    Rgb::from_u32(0xDCE775),
];

/// Palette for an option right.
#[inline]
pub fn palette(option_type: OptionType) -> &'static [Rgb] {
    match option_type {
        OptionType::Call => &CALL_PALETTE,
        OptionType::Put => &PUT_PALETTE,
    }
}

/// Normalised position of `value` on `[0, max]`, clamped to `[0, 1]`.
///
/// A zero `max` (an all-zero grid) is treated as 1. NaN maps to 0.
#[inline]
pub fn value_ratio(value: f64, max: f64) -> f64 {
    let max = if max == 0.0 { 1.0 } else { max };
    let ratio = value / max;
    // NaN fails the comparison and lands on 0
    if ratio > 0.0 {
        ratio.min(1.0)
    } else {
        0.0
    }
}

/// Continuous green-to-red ramp.
///
/// hue = 120·(1 - ratio), saturation 70%, lightness 40% + 8.5%·ratio.
///
/// # Examples
/// ```
/// use pricer_models::surface::colour::gradient;
///
/// assert_eq!(gradient(0.0, 10.0).hue, 120.0);
/// assert_eq!(gradient(10.0, 10.0).hue, 0.0);
/// ```
pub fn gradient(value: f64, max: f64) -> Hsl {
    let ratio = value_ratio(value, max);
    Hsl {
        hue: 120.0 * (1.0 - ratio),
        saturation: 70.0,
        lightness: 40.0 + 8.5 * ratio,
    }
}

/// Discrete palette entry at `floor(ratio·(len - 1))`.
pub fn palette_colour(value: f64, max: f64, option_type: OptionType) -> Rgb {
    let colours = palette(option_type);
    let ratio = value_ratio(value, max);
    let index = (ratio * (colours.len() - 1) as f64).floor() as usize;
    colours[index.min(colours.len() - 1)]
}

/// Legend strip for a surface with `steps` rows, top (red) to bottom (green).
///
/// Entry `i` has hue `120·i/(steps-1)`, saturation 75% and lightness
/// `50% - 10%·i/(steps-1)`. Fewer than two steps yields a single red entry.
pub fn legend_colours(steps: usize) -> Vec<Hsl> {
    if steps < 2 {
        return vec![Hsl {
            hue: 0.0,
            saturation: 75.0,
            lightness: 50.0,
        }];
    }
    (0..steps)
        .map(|i| {
            let ratio = i as f64 / (steps - 1) as f64;
            Hsl {
                hue: 120.0 * ratio,
                saturation: 75.0,
                lightness: 50.0 - 10.0 * ratio,
            }
        })
        .collect()
}

/// Whether a cell label should be drawn in a light colour for contrast.
#[inline]
pub fn prefers_light_label(value: f64, max: f64) -> bool {
    value > max / 2.0
}

/// Colouring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColourScheme {
    /// Continuous HSL ramp
    #[default]
    Gradient,
    /// Discrete per-right palette
    Palette,
}

impl FromStr for ColourScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gradient" => Ok(ColourScheme::Gradient),
            "palette" => Ok(ColourScheme::Palette),
            other => Err(format!(
                "Unknown colour scheme: {}. Expected gradient or palette",
                other
            )),
        }
    }
}

impl fmt::Display for ColourScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourScheme::Gradient => f.write_str("gradient"),
            ColourScheme::Palette => f.write_str("palette"),
        }
    }
}

/// Maps surface values to colours for one grid.
///
/// # Examples
/// ```
/// use pricer_models::surface::colour::{ColourMapper, ColourScheme, CALL_PALETTE};
/// use pricer_core::types::OptionType;
///
/// let mapper = ColourMapper::new(ColourScheme::Palette, OptionType::Call);
/// assert_eq!(mapper.colour_for(0.0, 25.0), CALL_PALETTE[0]);
/// assert_eq!(mapper.colour_for(25.0, 25.0), CALL_PALETTE[11]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourMapper {
    scheme: ColourScheme,
    option_type: OptionType,
}

impl ColourMapper {
    /// Creates a mapper; `option_type` only matters for the palette scheme.
    #[inline]
    pub fn new(scheme: ColourScheme, option_type: OptionType) -> Self {
        Self {
            scheme,
            option_type,
        }
    }

    /// Scheme in use.
    #[inline]
    pub fn scheme(&self) -> ColourScheme {
        self.scheme
    }

    /// Colour of a cell holding `value` in a grid whose maximum is `max`.
    pub fn colour_for(&self, value: f64, max: f64) -> Rgb {
        match self.scheme {
            ColourScheme::Gradient => gradient(value, max).to_rgb(),
            ColourScheme::Palette => palette_colour(value, max, self.option_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: Rgb = Rgb::new(31, 173, 31);
    const HIGH: Rgb = Rgb::new(210, 37, 37);

    #[test]
    fn test_hsl_to_rgb_primaries() {
        let blue = Hsl {
            hue: 240.0,
            saturation: 100.0,
            lightness: 50.0,
        };
        assert_eq!(blue.to_rgb(), Rgb::new(0, 0, 255));

        let grey = Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness: 50.0,
        };
        assert_eq!(grey.to_rgb(), Rgb::new(128, 128, 128));

        let wrapped = Hsl {
            hue: 360.0,
            saturation: 100.0,
            lightness: 50.0,
        };
        assert_eq!(wrapped.to_rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_u32(0x4A148C), Rgb::new(0x4A, 0x14, 0x8C));
        assert_eq!(CALL_PALETTE[0].to_hex(), "#4A148C");
        assert_eq!(format!("{}", PUT_PALETTE[11]), "#DCE775");
    }

    #[test]
    fn test_hsl_display() {
        assert_eq!(format!("{}", gradient(0.0, 1.0)), "hsl(120, 70%, 40%)");
        assert_eq!(format!("{}", gradient(1.0, 1.0)), "hsl(0, 70%, 48.5%)");
    }

    #[test]
    fn test_value_ratio() {
        assert_eq!(value_ratio(5.0, 10.0), 0.5);
        assert_eq!(value_ratio(0.0, 0.0), 0.0);
        assert_eq!(value_ratio(3.0, 0.0), 1.0);
        assert_eq!(value_ratio(10.01, 10.0), 1.0);
        assert_eq!(value_ratio(-1.0, 10.0), 0.0);
        assert_eq!(value_ratio(f64::NAN, 10.0), 0.0);
        assert_eq!(value_ratio(f64::NAN, 0.0), 0.0);
        assert_eq!(value_ratio(f64::INFINITY, 10.0), 1.0);
    }

    #[test]
    fn test_gradient_end_points() {
        for max in [0.01, 1.0, 37.5, 1e6] {
            let mapper = ColourMapper::new(ColourScheme::Gradient, OptionType::Call);
            assert_eq!(mapper.colour_for(0.0, max), LOW);
            assert_eq!(mapper.colour_for(max, max), HIGH);
        }
    }

    #[test]
    fn test_gradient_midpoint() {
        let mid = gradient(5.0, 10.0);
        assert_eq!(mid.hue, 60.0);
        assert_eq!(mid.lightness, 44.25);
        assert_eq!(mid.to_rgb(), Rgb::new(192, 192, 34));
    }

    #[test]
    fn test_nan_cell_maps_to_low_end() {
        let gradient_mapper = ColourMapper::new(ColourScheme::Gradient, OptionType::Call);
        assert_eq!(gradient_mapper.colour_for(f64::NAN, 10.0), LOW);
        let palette_mapper = ColourMapper::new(ColourScheme::Palette, OptionType::Put);
        assert_eq!(palette_mapper.colour_for(f64::NAN, 10.0), PUT_PALETTE[0]);
    }

    #[test]
    fn test_zero_grid_maps_to_low_end() {
        let mapper = ColourMapper::new(ColourScheme::Gradient, OptionType::Put);
        assert_eq!(mapper.colour_for(0.0, 0.0), LOW);
    }

    #[test]
    fn test_palette_end_points() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let mapper = ColourMapper::new(ColourScheme::Palette, option_type);
            let colours = palette(option_type);
            for max in [0.5, 12.0, 250.0] {
                assert_eq!(mapper.colour_for(0.0, max), colours[0]);
                assert_eq!(mapper.colour_for(max, max), colours[11]);
                assert_eq!(mapper.colour_for(max * 1.01, max), colours[11]);
            }
        }
    }

    #[test]
    fn test_palette_index_floors() {
        // ratio 0.5 → floor(5.5) = 5
        assert_eq!(palette_colour(5.0, 10.0, OptionType::Call), CALL_PALETTE[5]);
        assert_eq!(palette_colour(5.0, 10.0, OptionType::Put), PUT_PALETTE[5]);
    }

    #[test]
    fn test_legend_colours() {
        let legend = legend_colours(5);
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].hue, 0.0);
        assert_eq!(legend[0].lightness, 50.0);
        assert_eq!(legend[4].hue, 120.0);
        assert_eq!(legend[4].lightness, 40.0);
        assert_eq!(legend[0].to_rgb(), Rgb::new(223, 32, 32));
        assert_eq!(legend[4].to_rgb(), Rgb::new(25, 179, 25));
        assert_eq!(legend_colours(1).len(), 1);
    }

    #[test]
    fn test_prefers_light_label() {
        assert!(prefers_light_label(6.0, 10.0));
        assert!(!prefers_light_label(5.0, 10.0));
        assert!(!prefers_light_label(0.0, 0.0));
    }

    #[test]
    fn test_colour_scheme_parsing() {
        assert_eq!("Gradient".parse::<ColourScheme>(), Ok(ColourScheme::Gradient));
        assert_eq!("palette".parse::<ColourScheme>(), Ok(ColourScheme::Palette));
        assert!("rainbow".parse::<ColourScheme>().is_err());
        assert_eq!(ColourScheme::default(), ColourScheme::Gradient);
        assert_eq!(format!("{}", ColourScheme::Palette), "palette");
    }
}
