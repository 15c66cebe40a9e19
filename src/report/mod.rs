//! Embassy check reports.

pub mod generator;

pub use generator::{render_json, render_section, render_text};

use crate::checks::Section;
use serde::{Deserialize, Serialize};

/// The result of one embassy check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the region whose embassies were checked.
    pub region: String,
    /// Number of established or pending embassies.
    pub embassies_checked: usize,
    /// Number of embassy regions that could be retrieved.
    pub regions_retrieved: usize,
    /// One section per enabled check, in check order.
    pub sections: Vec<Section>,
}

impl Report {
    /// Total number of findings across all sections.
    pub fn total_findings(&self) -> usize {
        self.sections.iter().map(Section::total).sum()
    }

    pub fn has_findings(&self) -> bool {
        self.sections.iter().any(|s| !s.is_empty())
    }
}
