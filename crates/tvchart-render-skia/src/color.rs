// File: crates/tvchart-render-skia/src/color.rs
// Summary: CSS colour strings as carried by chart options (hex, rgb(), rgba(), a few names).

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `(a, r, g, b)` in the order Skia's `Color::from_argb` takes.
    pub fn argb(&self) -> (u8, u8, u8, u8) {
        (self.a, self.r, self.g, self.b)
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::opaque(0, 0, 0)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("red", Rgba::opaque(255, 0, 0)),
    ("green", Rgba::opaque(0, 128, 0)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("grey", Rgba::opaque(128, 128, 128)),
    ("transparent", Rgba::new(0, 0, 0, 0)),
];

/// Parse a colour string. Returns `None` for anything unrecognised.
///
/// The alpha channel of `rgba()` accepts both the CSS `0..=1` range and the
/// `0..=255` byte range the palette strings use; values above 1 are read as bytes.
pub fn parse_color(text: &str) -> Option<Rgba> {
    let s = text.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        let parts = split_args(args)?;
        if parts.len() != 4 {
            return None;
        }
        let a = if parts[3] <= 1.0 { parts[3] * 255.0 } else { parts[3] };
        return Some(Rgba::new(channel(parts[0]), channel(parts[1]), channel(parts[2]), channel(a)));
    }
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let parts = split_args(args)?;
        if parts.len() != 3 {
            return None;
        }
        return Some(Rgba::opaque(channel(parts[0]), channel(parts[1]), channel(parts[2])));
    }
    NAMED.iter().find(|(name, _)| *name == lower).map(|(_, c)| *c)
}

/// Parse `text`, falling back to `default` when absent or unparseable.
pub fn color_or(text: Option<&str>, default: Rgba) -> Rgba {
    text.and_then(parse_color).unwrap_or(default)
}

fn split_args(args: &str) -> Option<Vec<f64>> {
    args.split(',').map(|p| p.trim().parse::<f64>().ok()).collect()
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Rgba::opaque(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}
