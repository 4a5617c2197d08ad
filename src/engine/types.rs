use serde::{Deserialize, Serialize};

/// Primary laser head occupying a mount.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentHead {
    pub id: String,
    pub power: f64,               // Base power rating
    pub resistance: f64,          // Base resistance multiplier (0.7 = -30%)
    pub instability: Option<f64>, // Secondary multiplier, reported only
    pub slots: usize,             // Sub-module slot count
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    Passive,
    Active,
}

/// Discipline for temporary effects of active sub-modules.
///
/// `Sustained` effects are mutually exclusive across a whole unit;
/// `Stackable` effects accumulate freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    Stackable,
    Sustained,
}

/// Sub-module fitted into one of a head's slots.
///
/// `power` and `resistance` are stored as multipliers: 1.35 means +35%.
#[derive(Debug, Clone, PartialEq)]
pub struct SubModule {
    pub id: String,
    pub power: f64,
    pub resistance: f64,
    pub category: ModuleCategory,
    pub activation: Option<ActivationKind>,
    pub duration_secs: Option<u32>,
    pub uses: Option<u32>,
}

impl SubModule {
    pub fn power_delta(&self) -> f64 {
        self.power - 1.0
    }

    pub fn resistance_delta(&self) -> f64 {
        self.resistance - 1.0
    }

    pub fn is_active_category(&self) -> bool {
        self.category == ModuleCategory::Active
    }
}

/// Auxiliary attachment placed on the rock itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub id: String,
    pub resistance: f64,
    pub instability: Option<f64>,
}

/// One gadget entry of an operation, with its per-use flags.
#[derive(Debug, Clone, PartialEq)]
pub struct GadgetUse {
    pub gadget: Option<Gadget>,
    pub enabled: bool,
    pub present_at_scan: bool,
}

impl GadgetUse {
    pub fn new(gadget: Gadget) -> Self {
        Self {
            gadget: Some(gadget),
            enabled: true,
            present_at_scan: false,
        }
    }
}

/// A single mount: head, its sub-modules and their activation flags.
///
/// `modules` and `active` are parallel lists sized to the head's slot count.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSlotConfig {
    pub head: Option<AttachmentHead>,
    pub modules: Vec<Option<SubModule>>,
    pub active: Vec<bool>,
    pub staffed: bool,
}

impl Default for UnitSlotConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl UnitSlotConfig {
    /// An unfitted, staffed mount
    pub fn empty() -> Self {
        Self {
            head: None,
            modules: Vec::new(),
            active: Vec::new(),
            staffed: true,
        }
    }

    /// A mount carrying `head` with every sub-module slot empty
    pub fn with_head(head: AttachmentHead) -> Self {
        let slots = head.slots;
        Self {
            head: Some(head),
            modules: vec![None; slots],
            active: vec![false; slots],
            staffed: true,
        }
    }

    /// Fit `module` at `position`, with the default flag for its category
    /// (passives on, actives off). Positions past the slot count are ignored.
    pub fn fit(mut self, position: usize, module: SubModule) -> Self {
        if position < self.modules.len() {
            self.active[position] = module.category == ModuleCategory::Passive;
            self.modules[position] = Some(module);
        }
        self
    }

    pub fn is_module_active(&self, position: usize) -> bool {
        self.active.get(position).copied().unwrap_or(false)
    }

    /// Equipped sub-modules whose flag is on, in slot order
    pub fn active_modules(&self) -> impl Iterator<Item = &SubModule> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_module_active(*i))
            .filter_map(|(_, m)| m.as_ref())
    }

    pub fn head_id(&self) -> Option<&str> {
        self.head.as_ref().map(|h| h.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitConfiguration {
    pub slots: Vec<UnitSlotConfig>,
}

impl UnitConfiguration {
    pub fn new(slots: Vec<UnitSlotConfig>) -> Self {
        Self { slots }
    }
}

/// Vehicle kind. `requires_crew` marks kinds whose mounts need an operator;
/// an unstaffed mount on such a vehicle contributes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitKind {
    pub id: String,
    pub mounts: usize,
    pub requires_crew: bool,
}

impl UnitKind {
    pub fn new(id: &str, mounts: usize, requires_crew: bool) -> Self {
        Self {
            id: id.to_string(),
            mounts,
            requires_crew,
        }
    }

    /// Whether `slot` counts towards this vehicle's totals
    pub fn contributes(&self, slot: &UnitSlotConfig) -> bool {
        !self.requires_crew || slot.staffed
    }
}

/// A configured vehicle taking part in a group operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInstance {
    pub name: Option<String>,
    pub config: UnitConfiguration,
    pub kind: UnitKind,
    pub active: bool,
}

/// Mount that produced a resistance reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ScanSource {
    pub unit: usize,
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingMode {
    /// Reading is the rock's own resistance
    Baseline,
    /// Reading already includes the scanning mount's equipment and, when
    /// `gadgets_at_scan` is set, the gadgets flagged present during scan
    Contaminated {
        scanned_by: ScanSource,
        gadgets_at_scan: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObject {
    pub mass: f64,
    pub resistance: f64, // 0-100
    pub mode: ReadingMode,
}

impl TargetObject {
    pub fn baseline(mass: f64, resistance: f64) -> Self {
        Self {
            mass,
            resistance,
            mode: ReadingMode::Baseline,
        }
    }

    pub fn contaminated(
        mass: f64,
        resistance: f64,
        scanned_by: ScanSource,
        gadgets_at_scan: bool,
    ) -> Self {
        Self {
            mass,
            resistance,
            mode: ReadingMode::Contaminated {
                scanned_by,
                gadgets_at_scan,
            },
        }
    }
}

/// Baseline recovered from a contaminated reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reversal {
    pub baseline_resistance: f64,
    pub multiplier: f64,
}

/// Per-mount line of a result breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotContribution {
    pub unit: usize,
    pub slot: usize,
    pub head: Option<String>,
    pub power: f64,
    pub resistance_multiplier: f64,
    pub included: bool, // false when skipped for lack of crew
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub available_power: f64,
    pub equipment_multiplier: f64,
    pub gadget_multiplier: f64,
    pub resistance_multiplier: f64, // equipment x gadgets
    pub instability_multiplier: f64,
    pub effective_resistance: f64,
    pub required_at_baseline: f64,
    pub required_at_effective: f64,
    pub sufficient: bool,
    pub margin: f64,
    pub margin_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversal: Option<Reversal>,
    pub breakdown: Vec<SlotContribution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(slots: usize) -> AttachmentHead {
        AttachmentHead {
            id: "helix-1".to_string(),
            power: 3150.0,
            resistance: 0.7,
            instability: None,
            slots,
        }
    }

    fn module(category: ModuleCategory) -> SubModule {
        SubModule {
            id: "m".to_string(),
            power: 1.25,
            resistance: 1.0,
            category,
            activation: None,
            duration_secs: None,
            uses: None,
        }
    }

    #[test]
    fn test_with_head_sizes_module_lists() {
        let slot = UnitSlotConfig::with_head(head(3));
        assert_eq!(slot.modules.len(), 3);
        assert_eq!(slot.active.len(), 3);
        assert!(slot.staffed);
    }

    #[test]
    fn test_fit_sets_default_flags() {
        let slot = UnitSlotConfig::with_head(head(2))
            .fit(0, module(ModuleCategory::Passive))
            .fit(1, module(ModuleCategory::Active));
        assert!(slot.is_module_active(0));
        assert!(!slot.is_module_active(1));
    }

    #[test]
    fn test_fit_past_slot_count_ignored() {
        let slot = UnitSlotConfig::with_head(head(1)).fit(4, module(ModuleCategory::Passive));
        assert_eq!(slot.modules.len(), 1);
        assert!(slot.modules[0].is_none());
    }

    #[test]
    fn test_active_modules_skips_empty_and_off() {
        let mut slot = UnitSlotConfig::with_head(head(3))
            .fit(0, module(ModuleCategory::Passive))
            .fit(2, module(ModuleCategory::Active));
        slot.active[1] = true; // empty position, flag alone means nothing
        assert_eq!(slot.active_modules().count(), 1);
    }

    #[test]
    fn test_uncrewed_kind_ignores_staffing() {
        let mut slot = UnitSlotConfig::empty();
        slot.staffed = false;
        assert!(UnitKind::new("prospector", 1, false).contributes(&slot));
        assert!(!UnitKind::new("mole", 3, true).contributes(&slot));
    }
}
