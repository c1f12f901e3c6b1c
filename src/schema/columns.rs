/// Run number of the data-taking period
pub const RUN: &str = "Run";
/// Luminosity section within the run
pub const LUMI_SECT: &str = "LumiSect";
/// Event number within the luminosity section
pub const EVENT: &str = "Event";
/// Upstream Z+lepton (Z1L) selection flag
pub const PASSED_Z1L_SELECTION: &str = "passedZ1LSelection";
/// Upstream Z+X control-region selection flag
pub const PASSED_ZXCR_SELECTION: &str = "passedZXCRSelection";
/// Upstream fiducial-volume selection flag
pub const PASSED_FIDUCIAL_SELECTION: &str = "passedFiducialSelection";
/// Per-event generator and scale-factor weight
pub const EVENT_WEIGHT: &str = "eventWeight";
/// QCD NNLO/NLO k-factor for qqZZ, binned in m(ZZ)
pub const K_QQZZ_QCD_M: &str = "k_qqZZ_qcd_M";
/// Electroweak NLO k-factor for qqZZ
pub const K_QQZZ_EWK: &str = "k_qqZZ_ewk";
/// Missing transverse energy in GeV
pub const MET: &str = "met";
/// Four-lepton invariant mass with FSR recovery
pub const MASS4L: &str = "mass4l";
/// Four-lepton invariant mass without FSR recovery
pub const MASS4L_NOFSR: &str = "mass4l_noFSR";
/// Per-event mass uncertainty
pub const MASS4L_ERR: &str = "mass4lErr";
/// Four-lepton mass after Z1 kinematic refit
pub const MASS4L_REFIT: &str = "mass4lREFIT";
/// Mass uncertainty after Z1 kinematic refit
pub const MASS4L_ERR_REFIT: &str = "mass4lErrREFIT";
/// Four-lepton mass from the beamspot-constrained vertex fit
pub const MASS4L_VTX_BS: &str = "mass4l_vtx_BS";
/// Beamspot-constrained mass with FSR recovery
pub const MASS4L_VTXFSR_BS: &str = "mass4l_vtxFSR_BS";
/// Mass uncertainty for the beamspot-constrained fit
pub const MASS4L_ERR_VTX_BS: &str = "mass4lErr_vtx_BS";
/// Beamspot-constrained mass after kinematic refit
pub const MASS4L_REFIT_VTX_BS: &str = "mass4lREFIT_vtx_BS";
/// Mass uncertainty for the beamspot-constrained refit
pub const MASS4L_ERR_REFIT_VTX_BS: &str = "mass4lErrREFIT_vtx_BS";
/// Kinematic background discriminant
pub const D_BKG_KIN: &str = "D_bkg_kin";
/// Kinematic background discriminant, beamspot-constrained
pub const D_BKG_KIN_VTX_BS: &str = "D_bkg_kin_vtx_BS";

// Per-lepton sequence columns. All lists in one row are indexed in parallel:
// position i refers to the same lepton in each of them.
/// PDG identifier per lepton (±11 electrons, ±13 muons)
pub const LEP_ID: &str = "lep_id";
/// Tight-identification flag per lepton (0 or 1)
pub const LEP_TIGHT_ID: &str = "lep_tightId";
/// Position of each lepton in the Higgs candidate ordering
pub const LEP_HINDEX: &str = "lep_Hindex";
/// Index of the matched generator-level lepton
pub const LEP_GENINDEX: &str = "lep_genindex";
/// PDG identifier of the generator match within dR < 0.3
pub const LEP_MATCHED_R03_PDG_ID: &str = "lep_matchedR03_PdgId";
/// PDG identifier of the generator match's mother
pub const LEP_MATCHED_R03_MOM_ID: &str = "lep_matchedR03_MomId";
/// PDG identifier of the generator match's grandmother
pub const LEP_MATCHED_R03_MOM_MOM_ID: &str = "lep_matchedR03_MomMomId";
/// Transverse momentum per lepton
pub const LEP_PT: &str = "lep_pt";
/// Pseudorapidity per lepton
pub const LEP_ETA: &str = "lep_eta";
/// Azimuthal angle per lepton
pub const LEP_PHI: &str = "lep_phi";
/// Mass per lepton
pub const LEP_MASS: &str = "lep_mass";
/// Relative isolation per lepton, FSR-subtracted
pub const LEP_REL_ISO_NO_FSR: &str = "lep_RelIsoNoFSR";
/// Transverse momentum per lepton after FSR recovery
pub const LEP_FSR_PT: &str = "lepFSR_pt";
/// Pseudorapidity per lepton after FSR recovery
pub const LEP_FSR_ETA: &str = "lepFSR_eta";
/// Azimuthal angle per lepton after FSR recovery
pub const LEP_FSR_PHI: &str = "lepFSR_phi";
/// Mass per lepton after FSR recovery
pub const LEP_FSR_MASS: &str = "lepFSR_mass";
/// Transverse momentum per lepton from the beamspot-constrained vertex fit
pub const VTX_LEP_FSR_BS_PT: &str = "vtxLepFSR_BS_pt";
/// Pseudorapidity per lepton from the beamspot-constrained vertex fit
pub const VTX_LEP_FSR_BS_ETA: &str = "vtxLepFSR_BS_eta";
/// Azimuthal angle per lepton from the beamspot-constrained vertex fit
pub const VTX_LEP_FSR_BS_PHI: &str = "vtxLepFSR_BS_phi";
/// Mass per lepton from the beamspot-constrained vertex fit
pub const VTX_LEP_FSR_BS_MASS: &str = "vtxLepFSR_BS_mass";

/// Columns forming the composite event identifier used for deduplication.
pub const EVENT_ID_COLUMNS: [&str; 3] = [RUN, LUMI_SECT, EVENT];

/// Columns the row selector reads. `lep_pt` supplies the lepton count.
pub const SELECTION_COLUMNS: [&str; 6] = [
    PASSED_Z1L_SELECTION,
    PASSED_ZXCR_SELECTION,
    LEP_PT,
    LEP_ID,
    LEP_TIGHT_ID,
    LEP_REL_ISO_NO_FSR,
];

/// The default output allow-list: every column of the canonical event table,
/// in schema order.
pub const DEFAULT_SKIM_COLUMNS: [&str; 42] = [
    RUN,
    LUMI_SECT,
    EVENT,
    PASSED_Z1L_SELECTION,
    PASSED_ZXCR_SELECTION,
    PASSED_FIDUCIAL_SELECTION,
    EVENT_WEIGHT,
    K_QQZZ_QCD_M,
    K_QQZZ_EWK,
    MET,
    MASS4L,
    MASS4L_NOFSR,
    MASS4L_ERR,
    MASS4L_REFIT,
    MASS4L_ERR_REFIT,
    MASS4L_VTX_BS,
    MASS4L_VTXFSR_BS,
    MASS4L_ERR_VTX_BS,
    MASS4L_REFIT_VTX_BS,
    MASS4L_ERR_REFIT_VTX_BS,
    D_BKG_KIN,
    D_BKG_KIN_VTX_BS,
    LEP_ID,
    LEP_TIGHT_ID,
    LEP_HINDEX,
    LEP_GENINDEX,
    LEP_MATCHED_R03_PDG_ID,
    LEP_MATCHED_R03_MOM_ID,
    LEP_MATCHED_R03_MOM_MOM_ID,
    LEP_PT,
    LEP_ETA,
    LEP_PHI,
    LEP_MASS,
    LEP_REL_ISO_NO_FSR,
    LEP_FSR_PT,
    LEP_FSR_ETA,
    LEP_FSR_PHI,
    LEP_FSR_MASS,
    VTX_LEP_FSR_BS_PT,
    VTX_LEP_FSR_BS_ETA,
    VTX_LEP_FSR_BS_PHI,
    VTX_LEP_FSR_BS_MASS,
];
