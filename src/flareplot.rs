use crate::color::{interaction_color, ChainPalette};
use crate::error::Result;
use crate::fingerprint::filter_by_threshold;
use crate::residue::{is_residue_id, ResidueLabel};
use crate::types::*;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const TRACK_LABEL: &str = "Boxes";
pub const TREE_NAME: &str = "Group-order";

/// Every edge is drawn in the first (and only) flareplot frame
const EDGE_FRAMES: [u32; 1] = [0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub name1: String,
    pub name2: String,
    /// Fraction of frames in which the interaction is present
    pub width: f64,
    pub frames: Vec<u32>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackProperty {
    pub node_name: String,
    pub color: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_label: String,
    pub track_properties: Vec<TrackProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeProperty {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub tree_name: String,
    pub tree_properties: Vec<TreeProperty>,
}

/// The JSON document consumed by the flareplot JavaScript library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlareplotDocument {
    pub edges: Vec<Edge>,
    pub tracks: Vec<Track>,
    pub trees: Vec<Tree>,
}

impl Default for FlareplotDocument {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            tracks: vec![Track {
                track_label: TRACK_LABEL.to_string(),
                track_properties: Vec::new(),
            }],
            trees: vec![Tree {
                tree_name: TREE_NAME.to_string(),
                tree_properties: Vec::new(),
            }],
        }
    }
}

impl FlareplotDocument {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn track_properties(&self) -> &[TrackProperty] {
        &self.tracks[0].track_properties
    }

    pub fn tree_properties(&self) -> &[TreeProperty] {
        &self.trees[0].tree_properties
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Accumulates edges and node decorations while scanning interactions
struct DocumentBuilder {
    document: FlareplotDocument,
    palette: ChainPalette,
    // None when duplicate node entries are kept
    seen_nodes: Option<HashSet<String>>,
}

impl DocumentBuilder {
    fn new(dedupe_nodes: bool) -> Self {
        Self {
            document: FlareplotDocument::default(),
            palette: ChainPalette::new(),
            seen_nodes: dedupe_nodes.then(HashSet::new),
        }
    }

    fn push_node(&mut self, label: &ResidueLabel, weight: f64) {
        let color = self.palette.color(&label.chain).to_string();
        if let Some(seen) = self.seen_nodes.as_mut() {
            if !seen.insert(label.path.clone()) {
                return;
            }
        }
        self.document.tracks[0].track_properties.push(TrackProperty {
            node_name: label.node.clone(),
            color,
            size: weight * 2.0,
        });
        self.document.trees[0].tree_properties.push(TreeProperty {
            path: label.path.clone(),
        });
    }

    fn push_interaction(&mut self, key: &InteractionKey, count: usize, n_frames: usize) {
        let ligand = ResidueLabel::parse(&key.ligand);
        let protein = ResidueLabel::parse(&key.protein);
        self.palette.color(&ligand.chain);
        self.palette.color(&protein.chain);

        if count == 0 {
            return;
        }
        let weight = if n_frames > 0 {
            count as f64 / n_frames as f64
        } else {
            0.0
        };

        self.document.edges.push(Edge {
            name1: ligand.node.clone(),
            name2: protein.node.clone(),
            width: weight,
            frames: EDGE_FRAMES.to_vec(),
            color: interaction_color(&key.interaction),
        });
        self.push_node(&ligand, weight);
        self.push_node(&protein, weight);
    }
}

/// Converts every column of a fingerprint table into flareplot edges and node decorations.
///
/// # Arguments
/// * `table` - Interaction frequency table, usually already filtered by threshold
/// * `dedupe_nodes` - Keep only the first track/tree entry per residue
///
/// # Returns
/// * `Result<FlareplotDocument>` - One edge per interaction present in at least one
///   frame, weighted by the fraction of frames it is present in. Each edge adds
///   a track property and a tree path for both of its residues.
///
/// # Errors
/// * Returns `FlareplotError::Polars` if a column cannot be read as presence flags
pub fn convert_table(table: &FingerprintTable, dedupe_nodes: bool) -> Result<FlareplotDocument> {
    let n_frames = table.n_frames();
    if n_frames == 0 {
        warn!("fingerprint has no frames; the flareplot will be empty");
    }

    let mut builder = DocumentBuilder::new(dedupe_nodes);
    for key in table.keys() {
        for residue in [&key.ligand, &key.protein] {
            if !is_residue_id(residue) {
                debug!("residue label '{}' left unnormalized", residue);
            }
        }
        let count = table.present_count(key)?;
        builder.push_interaction(key, count, n_frames);
    }

    let document = builder.document;
    debug!(
        "built {} edges over {} chains ({} track properties)",
        document.edges.len(),
        builder.palette.len(),
        document.track_properties().len()
    );
    Ok(document)
}

/// Filters a table by the options' threshold and converts the survivors.
///
/// # Errors
/// * `FlareplotError::InvalidParameter` if the options are invalid
pub fn build_flareplot(
    table: &FingerprintTable,
    options: &FlareplotOptions,
) -> Result<FlareplotDocument> {
    options.validate()?;
    let filtered = filter_by_threshold(table, options.threshold)?;
    convert_table(&filtered, options.dedupe_nodes)
}
