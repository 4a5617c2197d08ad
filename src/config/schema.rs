use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::engine::{
    ActivationKind, AttachmentHead, Gadget, ModuleCategory, ScanSource, SubModule, UnitKind,
};

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

fn default_vehicle() -> String {
    "prospector".to_string()
}

fn one_mount() -> usize {
    1
}

/// A mining operation read from YAML.
///
/// Example:
/// ```yaml
/// units:
///   - vehicle: prospector
///     slots:
///       - head: helix-1
///         modules: [rieger-3, surge]
/// gadgets:
///   - id: sabir
/// target:
///   mass: 25000
///   resistance: 30
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Entries layered over the built-in catalog (matched by id)
    #[serde(default)]
    pub catalog: Option<CatalogOverrides>,

    /// Force group evaluation even with a single unit
    #[serde(default)]
    pub group: bool,

    #[serde(default)]
    pub units: Vec<UnitSpec>,

    #[serde(default)]
    pub gadgets: Vec<GadgetSpec>,

    pub target: TargetSpec,
}

impl Scenario {
    /// Built-in catalog with this scenario's overrides applied
    pub fn effective_catalog(&self) -> Catalog {
        match &self.catalog {
            Some(overrides) => Catalog::builtin().merged(overrides.clone().into()),
            None => Catalog::builtin(),
        }
    }

    /// Whether the group evaluator should be used
    pub fn is_group(&self) -> bool {
        self.group || self.units.len() > 1
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub heads: Vec<HeadEntry>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
    #[serde(default)]
    pub gadgets: Vec<GadgetEntry>,
    #[serde(default)]
    pub vehicles: Vec<VehicleEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeadEntry {
    pub id: String,
    pub power: f64,
    #[serde(default = "one")]
    pub resistance: f64,
    #[serde(default)]
    pub instability: Option<f64>,
    #[serde(default)]
    pub slots: usize,
}

/// Sub-module entry. Multipliers: 1.25 = +25%, 0.85 = -15%.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    pub id: String,
    #[serde(default = "one")]
    pub power: f64,
    #[serde(default = "one")]
    pub resistance: f64,
    pub category: ModuleCategory,
    #[serde(default)]
    pub activation: Option<ActivationKind>,
    /// Seconds an active effect lasts (display only)
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub uses: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GadgetEntry {
    pub id: String,
    #[serde(default = "one")]
    pub resistance: f64,
    #[serde(default)]
    pub instability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VehicleEntry {
    pub id: String,
    #[serde(default = "one_mount")]
    pub mounts: usize,
    #[serde(default)]
    pub requires_crew: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_vehicle")]
    pub vehicle: String,
    /// Whether this unit takes part in a group evaluation
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SlotSpec {
    #[serde(default)]
    pub head: Option<String>,
    /// Module ids by position; `~` leaves a position empty
    #[serde(default)]
    pub modules: Vec<Option<String>>,
    /// Activation flags by position. Defaults: passives on, actives off.
    #[serde(default)]
    pub active: Option<Vec<bool>>,
    #[serde(default = "yes")]
    pub staffed: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GadgetSpec {
    /// Missing id leaves the gadget entry empty
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default)]
    pub present_at_scan: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeSpec {
    #[default]
    Baseline,
    Contaminated,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    pub mass: f64,
    /// Scanned resistance, 0-100
    pub resistance: f64,
    #[serde(default)]
    pub mode: ModeSpec,
    #[serde(default)]
    pub scanned_by: Option<ScanSource>,
    /// Gadgets flagged `present_at_scan` were on the rock when it was read
    #[serde(default)]
    pub gadgets_at_scan: bool,
}

impl From<HeadEntry> for AttachmentHead {
    fn from(entry: HeadEntry) -> Self {
        Self {
            id: entry.id,
            power: entry.power,
            resistance: entry.resistance,
            instability: entry.instability,
            slots: entry.slots,
        }
    }
}

impl From<ModuleEntry> for SubModule {
    fn from(entry: ModuleEntry) -> Self {
        Self {
            id: entry.id,
            power: entry.power,
            resistance: entry.resistance,
            category: entry.category,
            activation: entry.activation,
            duration_secs: entry.duration,
            uses: entry.uses,
        }
    }
}

impl From<GadgetEntry> for Gadget {
    fn from(entry: GadgetEntry) -> Self {
        Self {
            id: entry.id,
            resistance: entry.resistance,
            instability: entry.instability,
        }
    }
}

impl From<VehicleEntry> for UnitKind {
    fn from(entry: VehicleEntry) -> Self {
        Self {
            id: entry.id,
            mounts: entry.mounts,
            requires_crew: entry.requires_crew,
        }
    }
}

impl From<CatalogOverrides> for Catalog {
    fn from(overrides: CatalogOverrides) -> Self {
        Self {
            heads: overrides.heads.into_iter().map(Into::into).collect(),
            modules: overrides.modules.into_iter().map(Into::into).collect(),
            gadgets: overrides.gadgets.into_iter().map(Into::into).collect(),
            vehicles: overrides.vehicles.into_iter().map(Into::into).collect(),
        }
    }
}
