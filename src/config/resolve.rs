use anyhow::{anyhow, bail, Context, Result};

use super::schema::{GadgetSpec, ModeSpec, Scenario, SlotSpec, TargetSpec, UnitSpec};
use crate::catalog::Catalog;
use crate::engine::{
    GadgetUse, ModuleCategory, ReadingMode, TargetObject, UnitConfiguration, UnitInstance,
    UnitSlotConfig,
};

/// A scenario turned into engine inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub units: Vec<UnitInstance>,
    pub gadgets: Vec<GadgetUse>,
    pub target: TargetObject,
    pub group: bool,
}

/// Look up every id of `scenario` in `catalog` and build engine inputs.
pub fn resolve(scenario: &Scenario, catalog: &Catalog) -> Result<Operation> {
    let units = scenario
        .units
        .iter()
        .enumerate()
        .map(|(i, unit)| resolve_unit(unit, catalog).with_context(|| format!("units[{}]", i)))
        .collect::<Result<Vec<_>>>()?;

    let gadgets = scenario
        .gadgets
        .iter()
        .enumerate()
        .map(|(i, gadget)| {
            resolve_gadget(gadget, catalog).with_context(|| format!("gadgets[{}]", i))
        })
        .collect::<Result<Vec<_>>>()?;

    let target = resolve_target(&scenario.target)?;
    if let ReadingMode::Contaminated { scanned_by, .. } = target.mode {
        let found = units
            .get(scanned_by.unit)
            .is_some_and(|unit| scanned_by.slot < unit.config.slots.len());
        if !found {
            tracing::warn!(
                unit = scanned_by.unit,
                slot = scanned_by.slot,
                "Scan source is not a listed mount; reading will not be reversed"
            );
        }
    }

    tracing::debug!(
        units = units.len(),
        gadgets = gadgets.len(),
        group = scenario.is_group(),
        "Resolved scenario"
    );

    Ok(Operation {
        units,
        gadgets,
        target,
        group: scenario.is_group(),
    })
}

fn resolve_unit(unit: &UnitSpec, catalog: &Catalog) -> Result<UnitInstance> {
    let kind = catalog
        .vehicle(&unit.vehicle)
        .ok_or_else(|| anyhow!("Unknown vehicle '{}'", unit.vehicle))?
        .clone();

    let slots = unit
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| resolve_slot(slot, catalog).with_context(|| format!("slots[{}]", i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(UnitInstance {
        name: unit.name.clone(),
        config: UnitConfiguration::new(slots),
        kind,
        active: unit.active,
    })
}

fn resolve_slot(spec: &SlotSpec, catalog: &Catalog) -> Result<UnitSlotConfig> {
    let Some(ref head_id) = spec.head else {
        if spec.modules.iter().any(Option::is_some) {
            bail!("Modules listed without a head");
        }
        return Ok(UnitSlotConfig {
            staffed: spec.staffed,
            ..UnitSlotConfig::empty()
        });
    };

    let head = catalog
        .head(head_id)
        .ok_or_else(|| anyhow!("Unknown head '{}'", head_id))?;
    if spec.modules.len() > head.slots {
        bail!(
            "{} modules listed but '{}' has {} module slots",
            spec.modules.len(),
            head.id,
            head.slots
        );
    }

    let mut slot = UnitSlotConfig::with_head(head.clone());
    slot.staffed = spec.staffed;

    for (position, id) in spec.modules.iter().enumerate() {
        let Some(id) = id else { continue };
        let module = catalog
            .module(id)
            .ok_or_else(|| anyhow!("Unknown module '{}'", id))?;
        slot.active[position] = match spec.active {
            Some(ref flags) => flags.get(position).copied().unwrap_or(false),
            None => module.category == ModuleCategory::Passive,
        };
        slot.modules[position] = Some(module.clone());
    }

    Ok(slot)
}

fn resolve_gadget(spec: &GadgetSpec, catalog: &Catalog) -> Result<GadgetUse> {
    let gadget = match spec.id {
        Some(ref id) => Some(
            catalog
                .gadget(id)
                .ok_or_else(|| anyhow!("Unknown gadget '{}'", id))?
                .clone(),
        ),
        None => None,
    };
    Ok(GadgetUse {
        gadget,
        enabled: spec.enabled,
        present_at_scan: spec.present_at_scan,
    })
}

fn resolve_target(spec: &TargetSpec) -> Result<TargetObject> {
    match spec.mode {
        ModeSpec::Baseline => Ok(TargetObject::baseline(spec.mass, spec.resistance)),
        ModeSpec::Contaminated => {
            let source = spec
                .scanned_by
                .context("target.scanned_by is required for a contaminated reading")?;
            Ok(TargetObject::contaminated(
                spec.mass,
                spec.resistance,
                source,
                spec.gadgets_at_scan,
            ))
        }
    }
}
