//! Residue label normalization: `LYS123.A` becomes `A.K123`.

use phf::phf_map;
use regex::Regex;
use std::sync::LazyLock;

/// Three-letter to one-letter codes of the 20 standard amino acids
pub static AMINO_ACID_CODES: phf::Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLU" => 'E', "GLN" => 'Q', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
};

// Anchored at the start only; anything after the chain token is ignored.
static RESIDUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3})(\d+)\.([A-Z0-9]+)").expect("residue pattern is valid")
});

/// Rewrites a residue identifier as `chain.one-letter-code+number`.
///
/// Codes outside the standard amino-acid table keep their three letters, and
/// strings that do not look like `<AAA><number>.<chain>` come back unchanged.
///
/// ```
/// use flareplot_rs::residue::normalize_residue;
///
/// assert_eq!(normalize_residue("LYS123.A"), "A.K123");
/// assert_eq!(normalize_residue("XYZ45.B"), "B.XYZ45");
/// assert_eq!(normalize_residue("garbage"), "garbage");
/// ```
pub fn normalize_residue(residue: &str) -> String {
    let Some(captures) = RESIDUE_PATTERN.captures(residue) else {
        return residue.to_string();
    };
    let (_, [three_letter, number, chain]) = captures.extract();

    match AMINO_ACID_CODES.get(three_letter) {
        Some(one_letter) => format!("{}.{}{}", chain, one_letter, number),
        None => format!("{}.{}{}", chain, three_letter, number),
    }
}

/// A normalized label split at its first period into chain and node name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueLabel {
    /// Full normalized label, used as the tree path
    pub path: String,
    pub chain: String,
    pub node: String,
}

impl ResidueLabel {
    /// Normalizes `residue` and splits the result.
    ///
    /// A label without a period is its own chain and node name.
    pub fn parse(residue: &str) -> Self {
        let path = normalize_residue(residue);
        let (chain, node) = match path.split_once('.') {
            Some((chain, rest)) => {
                // only the segment up to the next period names the node
                let node = rest.split('.').next().unwrap_or(rest);
                (chain.to_string(), node.to_string())
            }
            None => (path.clone(), path.clone()),
        };
        Self { path, chain, node }
    }
}

/// Whether `residue` has the `<AAA><number>.<chain>` shape that [`normalize_residue`] rewrites
pub fn is_residue_id(residue: &str) -> bool {
    RESIDUE_PATTERN.is_match(residue)
}
