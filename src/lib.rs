//! Convert protein-ligand interaction fingerprints into flareplot JSON and embeddable HTML
//!
//! A fingerprint is a frame × (ligand residue, protein residue, interaction type)
//! presence table. The conversion keeps the interactions present in at least a
//! threshold fraction of frames, turns each into a weighted, colored edge between
//! normalized residue labels, and embeds the resulting document in an HTML snippet
//! that draws it with the flareplot JavaScript library.
//!
//! ```no_run
//! use flareplot_rs::{generate_flareplot_from_fingerprint, FlareplotOptions};
//!
//! let options = FlareplotOptions::default().with_threshold(0.3).with_size(600, 600);
//! let html = generate_flareplot_from_fingerprint("fingerprint.csv", &options)?;
//! html.write_to("flareplot.html")?;
//! # Ok::<(), flareplot_rs::error::FlareplotError>(())
//! ```

pub mod color;
pub mod error;
pub mod fingerprint;
pub mod flareplot;
pub mod html;
pub mod residue;
pub mod types;

use log::info;
use std::path::Path;

pub use error::{FlareplotError, Result};
pub use flareplot::{build_flareplot, convert_table, FlareplotDocument};
pub use html::{render_html, FlareplotHtml};
pub use types::{FingerprintTable, FlareplotOptions, InteractionKey};

/// Loads a fingerprint, keeps interactions above the threshold and renders the flareplot snippet.
///
/// # Errors
/// * Any error from [`fingerprint::load_fingerprint`] or [`build_flareplot`]
pub fn generate_flareplot_from_fingerprint(
    fingerprint_path: impl AsRef<Path>,
    options: &FlareplotOptions,
) -> Result<FlareplotHtml> {
    options.validate()?;
    let table = fingerprint::load_fingerprint(fingerprint_path.as_ref())?;
    let document = build_flareplot(&table, options)?;
    info!(
        "flareplot of {}: {} of {} interactions drawn at threshold {}",
        fingerprint_path.as_ref().display(),
        document.edges.len(),
        table.n_interactions(),
        options.threshold
    );
    render_html(&document, options.width, options.height)
}
