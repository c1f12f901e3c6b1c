//! # Row Selection
//!
//! Decides, per event, membership in the analysis selection categories and
//! whether the event survives the skim.
//!
//! ## Categories
//!
//! Three mutually non-exclusive categories are evaluated, each of which can
//! be enabled or disabled independently in [`SelectionConfig`]:
//!
//! - **Z1L** ("single-extra-lepton"): the upstream `passedZ1LSelection` flag.
//! - **ZXCR** ("control-region"): the upstream `passedZXCRSelection` flag.
//! - **4P** ("four-prompt"): exactly four leptons, all four carrying the
//!   tight-identification flag, and every muon with relative isolation
//!   strictly below [`MAX_MUON_REL_ISO`]. Isolation is re-checked for muons
//!   only.
//!
//! An event is kept when it belongs to at least one enabled category.
//!
//! [`classify`] is a pure function over a borrowed [`EventRecord`]; callers
//! accumulate tallies through [`SelectionCounts`], so two passes over the
//! same rows with the same configuration always agree.

use serde::{Deserialize, Serialize};


/// Absolute PDG identifier of the muon.
pub const MUON_PDG_ID: i32 = 13;

/// Upper bound (exclusive) on relative isolation for muons in the
/// four-prompt category.
pub const MAX_MUON_REL_ISO: f32 = 0.35;

fn default_true() -> bool {
    true
}

/// Which selection categories are enabled for a skim pass.
///
/// All categories default to enabled, both in [`Default`] and when a TOML
/// `[selection]` section omits a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Keep events passing the Z+lepton selection
    #[serde(default = "default_true")]
    pub z1l: bool,
    /// Keep events passing the Z+X control-region selection
    #[serde(default = "default_true")]
    pub zxcr: bool,
    /// Keep events with four tight, isolated, prompt leptons
    #[serde(default = "default_true")]
    pub four_p: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            z1l: true,
            zxcr: true,
            four_p: true,
        }
    }
}

impl SelectionConfig {
    /// A configuration with every category disabled. Classifying with it
    /// keeps nothing.
    pub fn none() -> Self {
        Self {
            z1l: false,
            zxcr: false,
            four_p: false,
        }
    }

    /// True if at least one category is enabled.
    pub fn any_enabled(&self) -> bool {
        self.z1l || self.zxcr || self.four_p
    }

    /// Names of the enabled categories, for logs and footer metadata.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.z1l {
            names.push("z1l");
        }
        if self.zxcr {
            names.push("zxcr");
        }
        if self.four_p {
            names.push("four_p");
        }
        names
    }
}

/// Borrowed view of the fields the selector reads from one event.
///
/// The per-lepton slices are parallel: index `i` refers to the same lepton
/// in each. The reader layer checks the lengths before building a record;
/// [`classify`] assumes them equal.
#[derive(Debug, Clone, Copy)]
pub struct EventRecord<'a> {
    /// Upstream Z+lepton selection flag
    pub passed_z1l: bool,
    /// Upstream Z+X control-region selection flag
    pub passed_zxcr: bool,
    /// PDG identifier per lepton
    pub lep_id: &'a [i32],
    /// Tight-identification flag per lepton (nonzero = tight)
    pub lep_tight_id: &'a [i32],
    /// Relative isolation per lepton
    pub lep_rel_iso: &'a [f32],
    /// Number of leptons in the event
    pub n_leptons: usize,
}

/// Category membership of one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Categories {
    /// Passed the Z+lepton selection and the category is enabled
    pub z1l: bool,
    /// Passed the Z+X control-region selection and the category is enabled
    pub zxcr: bool,
    /// Passed the four-prompt selection and the category is enabled
    pub four_p: bool,
}

impl Categories {
    /// True if the event belongs to at least one category.
    pub fn any(&self) -> bool {
        self.z1l || self.zxcr || self.four_p
    }
}

/// Outcome of classifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whether the event survives the skim
    pub keep: bool,
    /// Which enabled categories the event belongs to
    pub categories: Categories,
}

/// Classifies one event against the enabled categories.
///
/// Pure: no global state, no side effects. Disabled categories never match,
/// so `keep` is the OR of the *enabled* category outcomes.
pub fn classify(record: &EventRecord<'_>, config: &SelectionConfig) -> Classification {
    let categories = Categories {
        z1l: config.z1l && record.passed_z1l,
        zxcr: config.zxcr && record.passed_zxcr,
        four_p: config.four_p && is_four_prompt(record),
    };

    Classification {
        keep: categories.any(),
        categories,
    }
}

/// Four-prompt test: exactly four leptons, four tight flags, and every muon
/// isolated below the threshold. Electrons are not isolation-checked here.
fn is_four_prompt(record: &EventRecord<'_>) -> bool {
    if record.n_leptons != 4 {
        return false;
    }

    let n_tight = record
        .lep_tight_id
        .iter()
        .filter(|&&tight| tight != 0)
        .count();
    if n_tight != 4 {
        return false;
    }

    record
        .lep_id
        .iter()
        .zip(record.lep_rel_iso)
        .all(|(&id, &iso)| id.abs() != MUON_PDG_ID || iso < MAX_MUON_REL_ISO)
}

/// Per-category tallies accumulated by the caller over one pass.
///
/// Categories are not exclusive, so the per-category counts can sum to more
/// than `kept`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCounts {
    /// Events classified
    pub events_seen: u64,
    /// Events in the Z+lepton category
    pub z1l: u64,
    /// Events in the Z+X control-region category
    pub zxcr: u64,
    /// Events in the four-prompt category
    pub four_p: u64,
    /// Events kept (in at least one enabled category)
    pub kept: u64,
}

impl SelectionCounts {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one classification outcome into the tallies.
    pub fn record(&mut self, classification: &Classification) {
        self.events_seen += 1;
        if classification.categories.z1l {
            self.z1l += 1;
        }
        if classification.categories.zxcr {
            self.zxcr += 1;
        }
        if classification.categories.four_p {
            self.four_p += 1;
        }
        if classification.keep {
            self.kept += 1;
        }
    }
}
