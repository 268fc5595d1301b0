use phf::phf_map;
use std::collections::HashMap;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

const CHAIN_SATURATION: f64 = 0.7;
const CHAIN_VALUE: f64 = 0.9;

/// Edge colors of the interaction types a fingerprint can report
pub static INTERACTION_COLORS: phf::Map<&'static str, &'static str> = phf_map! {
    "Hydrophobic" => "#905000",
    "HBDonor" => "#0000FF",
    "HBAcceptor" => "#FF0000",
    "PiStacking" => "#00FF00",
    "Anionic" => "#A00000",
    "Cationic" => "#0000A0",
    "CationPi" => "#00A000",
    "PiCation" => "#00A000",
    "VdWContact" => "#505050",
    "EdgeToFace" => "#00FF00",
    "FaceToFace" => "#00FF00",
    "MetalAcceptor" => "#8080FF",
    "MetalDonor" => "#8080FF",
    "XBAcceptor" => "#FF8080",
    "XBDonor" => "#FF8080",
};

/// 32-bit FNV-1a over raw bytes.
///
/// Colors derived from identifiers must not change between runs, so this is
/// used instead of the std hasher, whose output is seeded per process.
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Converts HSV (each component in [0, 1]) to RGB components in [0, 1]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Formats RGB components in [0, 1] as `#rrggbb`, truncating each channel
pub fn rgb_to_hex((r, g, b): (f64, f64, f64)) -> String {
    let channel = |c: f64| (c * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Deterministic color for a chain id: the hue comes from the id's hash,
/// saturation and value are fixed.
pub fn chain_color(chain_id: &str) -> String {
    let hue = (fnv1a_32(chain_id.as_bytes()) % 100) as f64 / 100.0;
    rgb_to_hex(hsv_to_rgb(hue, CHAIN_SATURATION, CHAIN_VALUE))
}

/// Edge color for an interaction type; unknown types get a hash-derived color.
pub fn interaction_color(interaction: &str) -> String {
    match INTERACTION_COLORS.get(interaction) {
        Some(color) => (*color).to_string(),
        None => format!("#{:06x}", fnv1a_32(interaction.as_bytes()) % 0xFF_FFFF),
    }
}

/// Chain colors computed once per chain and reused for every residue on it
#[derive(Debug, Default, Clone)]
pub struct ChainPalette {
    colors: HashMap<String, String>,
}

impl ChainPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&mut self, chain_id: &str) -> &str {
        self.colors
            .entry(chain_id.to_string())
            .or_insert_with(|| chain_color(chain_id))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
