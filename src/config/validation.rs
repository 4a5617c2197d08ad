use super::schema::{CatalogOverrides, ModeSpec, Scenario, UnitSpec};
use crate::catalog::Catalog;
use crate::engine::{ActivationKind, ModuleCategory};

fn check_multiplier(errors: &mut Vec<String>, path: String, value: f64) {
    if !(value > 0.0) {
        errors.push(format!("{}: must be positive (got {})", path, value));
    }
}

fn validate_overrides(overrides: &CatalogOverrides, errors: &mut Vec<String>) {
    for (i, head) in overrides.heads.iter().enumerate() {
        if head.power < 0.0 {
            errors.push(format!("catalog.heads[{}].power: must be non-negative", i));
        }
        check_multiplier(errors, format!("catalog.heads[{}].resistance", i), head.resistance);
        if let Some(instability) = head.instability {
            check_multiplier(errors, format!("catalog.heads[{}].instability", i), instability);
        }
    }
    for (i, module) in overrides.modules.iter().enumerate() {
        if module.power < 0.0 {
            errors.push(format!("catalog.modules[{}].power: must be non-negative", i));
        }
        check_multiplier(errors, format!("catalog.modules[{}].resistance", i), module.resistance);
    }
    for (i, gadget) in overrides.gadgets.iter().enumerate() {
        check_multiplier(errors, format!("catalog.gadgets[{}].resistance", i), gadget.resistance);
        if let Some(instability) = gadget.instability {
            check_multiplier(errors, format!("catalog.gadgets[{}].instability", i), instability);
        }
    }
}

/// Only one sustained ability may run per unit. Flags written in the scenario
/// skip the activation rules, so check them here.
fn validate_sustained(u: usize, unit: &UnitSpec, catalog: &Catalog, errors: &mut Vec<String>) {
    let mut running = Vec::new();
    for (s, slot) in unit.slots.iter().enumerate() {
        let Some(ref flags) = slot.active else { continue };
        for (p, id) in slot.modules.iter().enumerate() {
            let Some(module) = id.as_deref().and_then(|id| catalog.module(id)) else {
                continue;
            };
            let sustained = module.category == ModuleCategory::Active
                && module.activation == Some(ActivationKind::Sustained);
            if sustained && flags.get(p).copied().unwrap_or(false) {
                running.push(format!("slots[{}].modules[{}]", s, p));
            }
        }
    }
    if running.len() > 1 {
        errors.push(format!(
            "units[{}].active: more than one sustained module active ({})",
            u,
            running.join(", ")
        ));
    }
}

/// Validate a scenario against `catalog` before anything is evaluated.
/// Returns all validation errors at once (not just the first).
pub fn validate_scenario(scenario: &Scenario, catalog: &Catalog) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate catalog overrides
    if let Some(ref overrides) = scenario.catalog {
        validate_overrides(overrides, &mut errors);
    }

    // Validate units
    if scenario.units.is_empty() {
        errors.push("units: at least one unit is required".to_string());
    }

    for (u, unit) in scenario.units.iter().enumerate() {
        if catalog.vehicle(&unit.vehicle).is_none() {
            errors.push(format!("units[{}].vehicle: unknown vehicle '{}'", u, unit.vehicle));
        }

        for (s, slot) in unit.slots.iter().enumerate() {
            let path = format!("units[{}].slots[{}]", u, s);
            let head = match slot.head {
                Some(ref id) => {
                    let head = catalog.head(id);
                    if head.is_none() {
                        errors.push(format!("{}.head: unknown head '{}'", path, id));
                    }
                    head
                }
                None => None,
            };

            let fitted = slot.modules.iter().filter(|m| m.is_some()).count();
            if slot.head.is_none() && fitted > 0 {
                errors.push(format!("{}.modules: modules need a head to sit in", path));
            }
            if let Some(head) = head {
                if slot.modules.len() > head.slots {
                    errors.push(format!(
                        "{}.modules: {} listed but '{}' has {} module slots",
                        path,
                        slot.modules.len(),
                        head.id,
                        head.slots
                    ));
                }
            }

            for (p, module) in slot.modules.iter().enumerate() {
                if let Some(id) = module {
                    if catalog.module(id).is_none() {
                        errors.push(format!("{}.modules[{}]: unknown module '{}'", path, p, id));
                    }
                }
            }

            if let Some(ref flags) = slot.active {
                if flags.len() != slot.modules.len() {
                    errors.push(format!(
                        "{}.active: {} flags for {} modules",
                        path,
                        flags.len(),
                        slot.modules.len()
                    ));
                }
            }
        }

        validate_sustained(u, unit, catalog, &mut errors);
    }

    // Validate gadgets
    for (i, gadget) in scenario.gadgets.iter().enumerate() {
        if let Some(ref id) = gadget.id {
            if catalog.gadget(id).is_none() {
                errors.push(format!("gadgets[{}].id: unknown gadget '{}'", i, id));
            }
        }
    }

    // Validate target
    let target = &scenario.target;
    if !(target.mass > 0.0) {
        errors.push("target.mass: must be positive".to_string());
    }
    if !(0.0..=100.0).contains(&target.resistance) {
        errors.push(format!(
            "target.resistance: must be between 0 and 100 (got {})",
            target.resistance
        ));
    }
    // Contaminated readings need a scan source that exists
    if target.mode == ModeSpec::Contaminated {
        match target.scanned_by {
            None => errors.push(
                "target.scanned_by: required when mode is contaminated".to_string(),
            ),
            Some(source) => {
                let found = scenario
                    .units
                    .get(source.unit)
                    .is_some_and(|unit| source.slot < unit.slots.len());
                if !found {
                    errors.push(format!(
                        "target.scanned_by: no slot {} on unit {}",
                        source.slot, source.unit
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
