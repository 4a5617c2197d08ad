use anyhow::{bail, Context, Result};

use crate::engine::{active_flags, flatten_modules, toggle, with_active_flags, UnitInstance};

/// Address of one sub-module position: `unit:slot:position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRef {
    pub unit: usize,
    pub slot: usize,
    pub position: usize,
}

impl ModuleRef {
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            bail!("Module reference must look like UNIT:SLOT:POSITION, got '{}'", s);
        }
        let field = |i: usize, name: &str| -> Result<usize> {
            parts[i]
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} in '{}'", name, s))
        };
        Ok(ModuleRef {
            unit: field(0, "unit")?,
            slot: field(1, "slot")?,
            position: field(2, "position")?,
        })
    }
}

/// Parse `--activate` and `--deactivate` references into one request list.
/// A position named in both lists is refused, since the intent is ambiguous.
pub fn parse_toggles(activate: &[String], deactivate: &[String]) -> Result<Vec<(ModuleRef, bool)>> {
    let on = activate
        .iter()
        .map(|s| ModuleRef::parse(s))
        .collect::<Result<Vec<_>>>()?;
    let off = deactivate
        .iter()
        .map(|s| ModuleRef::parse(s))
        .collect::<Result<Vec<_>>>()?;

    if let Some(both) = on.iter().find(|r| off.contains(r)) {
        bail!(
            "Module {}:{}:{} is both activated and deactivated",
            both.unit,
            both.slot,
            both.position
        );
    }

    Ok(on
        .into_iter()
        .map(|r| (r, true))
        .chain(off.into_iter().map(|r| (r, false)))
        .collect())
}

/// Switch the module at `target` on or off, going through the activation
/// rules (switching a sustained module on drops the other sustained ones).
/// Returns new unit list; `units` is left as it was.
pub fn set_module_active(
    units: &[UnitInstance],
    target: ModuleRef,
    on: bool,
) -> Result<Vec<UnitInstance>> {
    let Some(unit) = units.get(target.unit) else {
        bail!("No unit {} (scenario has {})", target.unit, units.len());
    };

    let modules = flatten_modules(&unit.config);
    let index = modules
        .iter()
        .position(|m| m.slot == target.slot && m.position == target.position)
        .with_context(|| {
            format!(
                "No module position {} on slot {} of unit {}",
                target.position, target.slot, target.unit
            )
        })?;
    if modules[index].category.is_none() {
        bail!(
            "Module position {} on slot {} of unit {} is empty",
            target.position,
            target.slot,
            target.unit
        );
    }

    let flags = active_flags(&unit.config);
    let mut next = units.to_vec();
    if flags[index] != on {
        let flags = toggle(&modules, &flags, index);
        next[target.unit].config = with_active_flags(&unit.config, &flags);
        tracing::debug!(
            unit = target.unit,
            slot = target.slot,
            position = target.position,
            on,
            "Toggled module"
        );
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, Scenario};

    fn units() -> Vec<UnitInstance> {
        let yaml = r#"
units:
  - vehicle: mole
    slots:
      - head: helix-2
        modules: [stampede, rieger-3, surge]
      - head: helix-2
        modules: [lifeline, ~]
target: { mass: 25000, resistance: 30 }
"#;
        let scenario: Scenario = serde_saphyr::from_str(yaml).unwrap();
        resolve(&scenario, &scenario.effective_catalog()).unwrap().units
    }

    #[test]
    fn test_parse_module_ref() {
        let r = ModuleRef::parse("0:1:2").unwrap();
        assert_eq!(r, ModuleRef { unit: 0, slot: 1, position: 2 });
    }

    #[test]
    fn test_parse_rejects_bad_refs() {
        assert!(ModuleRef::parse("0:1").is_err());
        assert!(ModuleRef::parse("a:b:c").is_err());
        assert!(ModuleRef::parse("0:1:-2").is_err());
    }

    #[test]
    fn test_parse_toggles_keeps_both_lists() {
        let requests = parse_toggles(&["0:0:0".to_string()], &["0:1:0".to_string()]).unwrap();
        assert_eq!(
            requests,
            vec![
                (ModuleRef { unit: 0, slot: 0, position: 0 }, true),
                (ModuleRef { unit: 0, slot: 1, position: 0 }, false),
            ]
        );
    }

    #[test]
    fn test_parse_toggles_rejects_same_position_in_both() {
        let err = parse_toggles(&["0:0:1".to_string()], &[" 0:0:1".to_string()]).unwrap_err();
        assert!(err.to_string().contains("0:0:1"));
        assert!(parse_toggles(&["0:0".to_string()], &[]).is_err());
    }

    #[test]
    fn test_activate_sustained_drops_other_sustained() {
        let units = units();
        let on = set_module_active(&units, ModuleRef { unit: 0, slot: 0, position: 0 }, true).unwrap();
        assert!(on[0].config.slots[0].is_module_active(0));

        let switched =
            set_module_active(&on, ModuleRef { unit: 0, slot: 1, position: 0 }, true).unwrap();
        assert!(!switched[0].config.slots[0].is_module_active(0));
        assert!(switched[0].config.slots[1].is_module_active(0));
        // Passive untouched
        assert!(switched[0].config.slots[0].is_module_active(1));
    }

    #[test]
    fn test_setting_current_state_is_noop() {
        let units = units();
        let same = set_module_active(&units, ModuleRef { unit: 0, slot: 0, position: 1 }, true).unwrap();
        assert_eq!(same, units);
    }

    #[test]
    fn test_deactivate_passive() {
        let units = units();
        let off = set_module_active(&units, ModuleRef { unit: 0, slot: 0, position: 1 }, false).unwrap();
        assert!(!off[0].config.slots[0].is_module_active(1));
        assert!(units[0].config.slots[0].is_module_active(1));
    }

    #[test]
    fn test_bad_targets() {
        let units = units();
        assert!(set_module_active(&units, ModuleRef { unit: 3, slot: 0, position: 0 }, true).is_err());
        assert!(set_module_active(&units, ModuleRef { unit: 0, slot: 0, position: 9 }, true).is_err());
        assert!(set_module_active(&units, ModuleRef { unit: 0, slot: 1, position: 1 }, true).is_err());
    }
}
