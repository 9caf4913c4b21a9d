//! Material palette: resolves material identifier strings to render colors.
//!
//! Identifiers are opaque strings, typically chemical substance codes
//! (`CAS:...`) or tool codes. The closed set of known materials maps to fixed
//! literal colors; everything else gets a color derived from the string
//! content alone, so any material, known or not, renders the same on every
//! call, every run, and every machine.

use phf::phf_map;

/// An RGB color with each channel in [0, 1].
pub type Color = [f32; 3];

/// Fixed colors for the known material identifiers.
static COLOR_TABLE: phf::Map<&'static str, Color> = phf_map! {
    "CAS:1317-65-3" => [0.7, 0.7, 0.7],       // calcium carbonate, limestone gray
    "CAS:14808-60-7" => [0.93, 0.9, 0.84],    // quartz
    "CAS:1309-37-1" => [0.55, 0.25, 0.16],    // hematite
    "CAS:1317-39-1" => [0.72, 0.44, 0.2],     // cuprite
    "CAS:7782-42-5" => [0.2, 0.2, 0.22],      // graphite
    "CAS:1303-96-4" => [0.88, 0.87, 0.82],    // borax
    "CAS:7732-18-5" => [0.25, 0.5, 0.85],     // water
    "CAS:14807-96-6" => [0.78, 0.82, 0.78],   // talc
    "CAS:1318-16-7" => [0.76, 0.6, 0.42],     // bauxite
    "CAS:12173-47-6" => [0.36, 0.55, 0.3],    // glauconite green
    "TOOL:spade" => [0.45, 0.33, 0.22],
    "TOOL:pick" => [0.5, 0.52, 0.56],
};

/// Resolve a material identifier to its render color.
///
/// Known identifiers come straight from the fixed table. Unknown ones fall
/// through to [`fallback`]; either way the result is stable for the lifetime
/// of the identifier string, not just the process.
pub fn resolve(material: &str) -> Color {
    match COLOR_TABLE.get(material) {
        Some(color) => *color,
        None => fallback(material),
    }
}

/// Deterministic color for identifiers outside the fixed table.
///
/// The generator is seeded with a content hash of the identifier, never with
/// a per-process salt, so reopening the same world cannot recolor it. Hue is
/// unrestricted; saturation and value are kept off the grays and the darks so
/// unknown materials stay distinguishable against the terrain.
fn fallback(material: &str) -> Color {
    let mut rng = fastrand::Rng::with_seed(fnv1a(material.as_bytes()));
    let h = rng.f32();
    let s = 0.6 + 0.4 * rng.f32();
    let v = 0.5 + 0.5 * rng.f32();
    hsv_to_rgb(h, s, v)
}

/// 64-bit FNV-1a over the raw identifier bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Standard six-sector HSV to RGB conversion.
///
/// `h` in [0, 1), `s` and `v` in [0, 1].
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
