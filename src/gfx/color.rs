//! Conversions between the color spaces the sketches interpolate in.
//!
//! Triples are plain `[f32; 3]`; the math runs in f64. Nothing here clamps:
//! an interpolated LAB color can land outside the sRGB gamut and come back
//! with negative or >255 channels. Clamp at display time
//! (see [`Color::from_rgb255`](super::math::Color::from_rgb255)).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Hue in degrees 0..360, saturation and lightness in percent 0..100.
    Hsl,
    /// sRGB channels 0..255, unrounded.
    Rgb,
    /// CIE XYZ, D65, Y in 0..100.
    Xyz,
    /// CIE L*a*b*, D65.
    Lab,
    /// Cylindrical L*a*b*: lightness, chroma, hue in degrees.
    Lch,
}

/// Linear sRGB to XYZ (D65), rows X, Y, Z.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_390_799_265_95, 0.357_584_339_383_87, 0.180_480_788_401_83],
    [0.212_639_005_871_51, 0.715_168_678_767_75, 0.072_192_315_360_733],
    [0.019_330_818_715_591, 0.119_194_779_794_62, 0.950_532_152_249_66],
];

const EPSILON: f64 = 216.0 / 24389.0; // (6/29)^3
const KAPPA: f64 = 24389.0 / 27.0;

/// Converts `color` from one space to another. Deterministic and total:
/// out-of-gamut input produces out-of-range output instead of an error.
pub fn convert(from: ColorSpace, to: ColorSpace, color: [f32; 3]) -> [f32; 3] {
    if from == to {
        return color;
    }

    let input = color.map(f64::from);
    let rgb = to_rgb(from, input);
    let out = from_rgb(to, rgb);

    let mut out = out.map(|c| c as f32);
    // hue components can round up to exactly 360 when narrowed
    if matches!(to, ColorSpace::Hsl) && out[0] >= 360.0 {
        out[0] = 0.0;
    }
    if matches!(to, ColorSpace::Lch) && out[2] >= 360.0 {
        out[2] = 0.0;
    }
    out
}

fn to_rgb(space: ColorSpace, c: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Rgb => c,
        ColorSpace::Hsl => hsl_to_rgb(c),
        ColorSpace::Xyz => xyz_to_rgb(c),
        ColorSpace::Lab => xyz_to_rgb(lab_to_xyz(c)),
        ColorSpace::Lch => xyz_to_rgb(lab_to_xyz(lch_to_lab(c))),
    }
}

fn from_rgb(space: ColorSpace, rgb: [f64; 3]) -> [f64; 3] {
    match space {
        ColorSpace::Rgb => rgb,
        ColorSpace::Hsl => rgb_to_hsl(rgb),
        ColorSpace::Xyz => rgb_to_xyz(rgb),
        ColorSpace::Lab => xyz_to_lab(rgb_to_xyz(rgb)),
        ColorSpace::Lch => lab_to_lch(xyz_to_lab(rgb_to_xyz(rgb))),
    }
}

fn hsl_to_rgb([h, s, l]: [f64; 3]) -> [f64; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        v * 255.0
    };

    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

fn rgb_to_hsl(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = rgb.map(|c| c / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return [0.0, 0.0, l * 100.0];
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    [(h * 60.0).rem_euclid(360.0), s * 100.0, l * 100.0]
}

// sRGB companding, IEC 61966-2-1
fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn compand(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn rgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = rgb.map(|c| linearize(c / 255.0));
    SRGB_TO_XYZ.map(|[mr, mg, mb]| (r * mr + g * mg + b * mb) * 100.0)
}

/// D65 reference white as the matrix above sees it: sRGB white in XYZ.
/// The rounded textbook value (95.047, 100, 108.883) leaves white slightly
/// off-neutral in LAB.
fn white() -> [f64; 3] {
    rgb_to_xyz([255.0, 255.0, 255.0])
}

fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = xyz.map(|c| c / 100.0);
    let r = x * 3.240_969_941_904_521 - y * 1.537_383_177_570_093 - z * 0.498_610_760_293;
    let g = -x * 0.969_243_636_280_87 + y * 1.875_967_501_507_72 + z * 0.041_555_057_407_175;
    let b = x * 0.055_630_079_696_993 - y * 0.203_976_958_888_97 + z * 1.056_971_514_242_878;
    [r, g, b].map(|c| compand(c) * 255.0)
}

fn xyz_to_lab(xyz: [f64; 3]) -> [f64; 3] {
    let f = |t: f64| {
        if t > EPSILON {
            t.cbrt()
        } else {
            (KAPPA * t + 16.0) / 116.0
        }
    };
    let white = white();
    let fx = f(xyz[0] / white[0]);
    let fy = f(xyz[1] / white[1]);
    let fz = f(xyz[2] / white[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_to_xyz([l, a, b]: [f64; 3]) -> [f64; 3] {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let finv = |f: f64| {
        let cube = f * f * f;
        if cube > EPSILON {
            cube
        } else {
            (116.0 * f - 16.0) / KAPPA
        }
    };

    let white = white();
    [finv(fx) * white[0], finv(fy) * white[1], finv(fz) * white[2]]
}

fn lab_to_lch([l, a, b]: [f64; 3]) -> [f64; 3] {
    let c = a.hypot(b);
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);
    [l, c, h]
}

fn lch_to_lab([l, c, h]: [f64; 3]) -> [f64; 3] {
    let (sin, cos) = h.to_radians().sin_cos();
    [l, c * cos, c * sin]
}
