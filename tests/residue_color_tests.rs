use flareplot_rs::color::{
    chain_color, fnv1a_32, hsv_to_rgb, interaction_color, rgb_to_hex, ChainPalette,
    INTERACTION_COLORS,
};
use flareplot_rs::residue::{is_residue_id, normalize_residue, ResidueLabel, AMINO_ACID_CODES};

#[test]
fn test_normalize_residue() {
    assert_eq!(normalize_residue("LYS123.A"), "A.K123");
    assert_eq!(normalize_residue("ALA50.B"), "B.A50");
    assert_eq!(normalize_residue("TRP7.X1"), "X1.W7");

    // unknown three-letter codes pass through
    assert_eq!(normalize_residue("XYZ45.B"), "B.XYZ45");
    assert_eq!(normalize_residue("LIG101.A"), "A.LIG101");

    // non-matching strings come back unchanged
    assert_eq!(normalize_residue("garbage"), "garbage");
    assert_eq!(normalize_residue("lys123.A"), "lys123.A");
    assert_eq!(normalize_residue("LYS123"), "LYS123");
    assert_eq!(normalize_residue(""), "");
}

#[test]
fn test_normalize_residue_ignores_trailing_text() {
    assert_eq!(normalize_residue("GLY12.A.extra"), "A.G12");
    assert_eq!(normalize_residue("GLY12.AB_1"), "AB.G12");
}

#[test]
fn test_amino_acid_table() {
    assert_eq!(AMINO_ACID_CODES.len(), 20);
    assert_eq!(AMINO_ACID_CODES.get("HIS"), Some(&'H'));
    assert_eq!(AMINO_ACID_CODES.get("HOH"), None);
}

#[test]
fn test_residue_label() {
    let label = ResidueLabel::parse("LYS123.A");
    assert_eq!(label.path, "A.K123");
    assert_eq!(label.chain, "A");
    assert_eq!(label.node, "K123");

    let label = ResidueLabel::parse("garbage");
    assert_eq!(label.path, "garbage");
    assert_eq!(label.chain, "garbage");
    assert_eq!(label.node, "garbage");

    assert!(is_residue_id("LYS123.A"));
    assert!(!is_residue_id("garbage"));
}

#[test]
fn test_fnv1a_32() {
    assert_eq!(fnv1a_32(b""), 0x811C_9DC5);
    assert_eq!(fnv1a_32(b"a"), 0xE40C_292C);
    assert_eq!(fnv1a_32(b"foobar"), 0xBF9C_F968);
}

#[test]
fn test_hsv_to_rgb() {
    assert_eq!(hsv_to_rgb(0.0, 0.0, 0.5), (0.5, 0.5, 0.5));
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
    assert_eq!(rgb_to_hex(hsv_to_rgb(0.0, 1.0, 1.0)), "#ff0000");
    assert_eq!(rgb_to_hex((0.0, 0.0, 1.0)), "#0000ff");
    assert_eq!(rgb_to_hex((0.9, 0.9, 0.9)), "#e5e5e5");
}

#[test]
fn test_chain_color() {
    assert_eq!(chain_color("A"), "#e5b844");
    assert_eq!(chain_color("B"), "#5b44e5");
    assert_eq!(chain_color("A"), chain_color("A"));
    assert_ne!(chain_color("A"), chain_color("B"));

    let color = chain_color("some-other-chain");
    assert_eq!(color.len(), 7);
    assert!(color.starts_with('#'));
    assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_chain_palette_caches() {
    let mut palette = ChainPalette::new();
    assert!(palette.is_empty());
    assert_eq!(palette.color("A"), "#e5b844");
    assert_eq!(palette.color("B"), "#5b44e5");
    assert_eq!(palette.color("A"), "#e5b844");
    assert_eq!(palette.len(), 2);
}

#[test]
fn test_interaction_color() {
    assert_eq!(INTERACTION_COLORS.len(), 15);
    assert_eq!(interaction_color("HBDonor"), "#0000FF");
    assert_eq!(interaction_color("Hydrophobic"), "#905000");
    assert_eq!(interaction_color("PiCation"), interaction_color("CationPi"));

    // unknown kinds depend only on the name
    assert_eq!(interaction_color("SaltBridge"), "#9c86fa");
    let _ = interaction_color("Unknown");
    assert_eq!(interaction_color("SaltBridge"), "#9c86fa");
    assert_eq!(interaction_color("Unknown"), "#200f25");
}
