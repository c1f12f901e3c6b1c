//! # Event Table Schema Definition
//!
//! This module defines the Apache Arrow schema for the four-lepton event
//! table that ntskim reads and writes.
//!
//! ## Design Rationale
//!
//! Each row is one collision event. Scalar columns hold event-level
//! quantities; variable-length list columns hold per-lepton quantities that
//! are indexed in parallel (`lep_pt[i]`, `lep_id[i]`, `lep_tightId[i]` all
//! describe the same lepton). Keeping the per-lepton vectors as list columns
//! preserves the row-per-event structure of the upstream ntuples, so a skim
//! is a pure row filter plus a column projection.
//!
//! ## Schema Columns
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | Run | UInt64 | Run number (dedup key) |
//! | LumiSect | UInt64 | Luminosity section (dedup key) |
//! | Event | UInt64 | Event number (dedup key) |
//! | passedZ1LSelection | Boolean | Z+lepton selection flag |
//! | passedZXCRSelection | Boolean | Z+X control-region flag |
//! | passedFiducialSelection | Boolean | Fiducial-volume flag |
//! | eventWeight | Float32 | Generator and scale-factor weight |
//! | k_qqZZ_qcd_M, k_qqZZ_ewk | Float32 | qqZZ k-factors |
//! | met | Float32 | Missing transverse energy (GeV) |
//! | mass4l family (10 columns) | Float32 | Four-lepton mass variants and uncertainties (GeV) |
//! | D_bkg_kin, D_bkg_kin_vtx_BS | Float32 | Kinematic discriminants |
//! | lep_id, lep_tightId, lep_Hindex, lep_genindex | `List<Int32>` | Per-lepton identifiers and flags |
//! | lep_matchedR03_{PdgId,MomId,MomMomId} | `List<Int32>` | Generator-match ancestry |
//! | lep_{pt,eta,phi,mass}, lep_RelIsoNoFSR | `List<Float32>` | Per-lepton kinematics and isolation |
//! | lepFSR_{pt,eta,phi,mass} | `List<Float32>` | Kinematics after FSR recovery |
//! | vtxLepFSR_BS_{pt,eta,phi,mass} | `List<Float64>` | Beamspot-constrained kinematics |
//!
//! All columns are non-nullable and list items are non-nullable: the
//! upstream producers fill every branch for every event.
//!
//! ## Column Groups
//!
//! [`columns::EVENT_ID_COLUMNS`] names the composite deduplication key,
//! [`columns::SELECTION_COLUMNS`] the fields the row selector needs, and
//! [`columns::DEFAULT_SKIM_COLUMNS`] the default output allow-list.

mod builders;
/// Event table column name constants and column groups.
pub mod columns;
mod constants;
mod validation;


pub use builders::{create_event_schema, create_event_schema_arc};
pub use columns::*;
pub use constants::*;
pub use validation::{validate_event_schema, SchemaValidationError};
