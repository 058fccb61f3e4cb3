use nalgebra::{vector, Vector4};

/// Floating point color, channels in <0;1>
pub type RGBA = Vector4<f32>;

/// Quantized color as stored in slice images
pub type Texel = [u8; 4];

/// Alpha of every stored texel.
/// Slices are blended with `SRC_ALPHA, DST_ALPHA`, near-black color is what
/// makes a texel see-through.
pub const OPAQUE: u8 = 255;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Quantize color into a texel.
///
/// Channels are squared for more midtones and scaled by `declip` so the
/// brightest colors stay away from full white. Alpha is always [`OPAQUE`].
pub fn quantize(color: RGBA, declip: f32) -> Texel {
    let channel = |c: f32| {
        let c = c.clamp(0.0, 1.0);
        (c * c * 255.0 * declip) as u8
    };
    [channel(color.x), channel(color.y), channel(color.z), OPAQUE]
}
