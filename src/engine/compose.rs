use super::types::{SubModule, UnitSlotConfig};

/// Sum of sub-module deltas within one mount.
///
/// Sub-module bonuses on the same head add up as percentages before being
/// applied: +35% and +35% make +70%, not x1.35^2.
pub fn sum_module_deltas<'a, I, F>(modules: I, delta: F) -> f64
where
    I: IntoIterator<Item = &'a SubModule>,
    F: Fn(&SubModule) -> f64,
{
    modules.into_iter().map(delta).sum()
}

/// Power delivered by one mount.
pub fn compose_power(slot: &UnitSlotConfig) -> f64 {
    let Some(head) = &slot.head else {
        return 0.0;
    };
    let deltas = sum_module_deltas(slot.active_modules(), SubModule::power_delta);
    head.power * (1.0 + deltas)
}

/// Resistance multiplier of one mount. With `passive_only`, active-category
/// sub-modules are left out whatever their flag says.
pub fn compose_resistance(slot: &UnitSlotConfig, passive_only: bool) -> f64 {
    let Some(head) = &slot.head else {
        return 1.0;
    };
    let deltas = sum_module_deltas(
        slot.active_modules()
            .filter(|m| !(passive_only && m.is_active_category())),
        SubModule::resistance_delta,
    );
    head.resistance * (1.0 + deltas)
}

pub fn compose_instability(slot: &UnitSlotConfig) -> f64 {
    slot.head
        .as_ref()
        .and_then(|h| h.instability)
        .unwrap_or(1.0)
}

/// Combine per-vehicle equipment multipliers for a group operation.
///
/// Across vehicles reductions compound: two x0.7 lasers on the same rock
/// give x0.49. Do not confuse with [`sum_module_deltas`].
pub fn stack_unit_multipliers<I>(multipliers: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    multipliers.into_iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ActivationKind, AttachmentHead, ModuleCategory};

    fn head(power: f64, resistance: f64, slots: usize) -> AttachmentHead {
        AttachmentHead {
            id: "head".to_string(),
            power,
            resistance,
            instability: None,
            slots,
        }
    }

    fn module(power: f64, resistance: f64, category: ModuleCategory) -> SubModule {
        SubModule {
            id: "module".to_string(),
            power,
            resistance,
            category,
            activation: match category {
                ModuleCategory::Active => Some(ActivationKind::Stackable),
                ModuleCategory::Passive => None,
            },
            duration_secs: None,
            uses: None,
        }
    }

    #[test]
    fn test_empty_slot_is_neutral() {
        let slot = UnitSlotConfig::empty();
        assert_eq!(compose_power(&slot), 0.0);
        assert_eq!(compose_resistance(&slot, false), 1.0);
        assert_eq!(compose_resistance(&slot, true), 1.0);
        assert_eq!(compose_instability(&slot), 1.0);
    }

    #[test]
    fn test_head_only() {
        let slot = UnitSlotConfig::with_head(head(1000.0, 0.7, 2));
        assert_eq!(compose_power(&slot), 1000.0);
        assert!((compose_resistance(&slot, false) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_power_deltas_add_before_multiplying() {
        let slot = UnitSlotConfig::with_head(head(1000.0, 1.0, 2))
            .fit(0, module(1.35, 1.0, ModuleCategory::Passive))
            .fit(1, module(1.15, 1.0, ModuleCategory::Passive));
        let power = compose_power(&slot);
        // 1000 * (1 + 0.35 + 0.15), not 1000 * 1.35 * 1.15
        assert!((power - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_equal_bonuses_make_seventy_percent() {
        let slot = UnitSlotConfig::with_head(head(1000.0, 1.0, 2))
            .fit(0, module(1.35, 1.0, ModuleCategory::Passive))
            .fit(1, module(1.35, 1.0, ModuleCategory::Passive));
        assert!((compose_power(&slot) - 1700.0).abs() < 1e-9);
    }

    #[test]
    fn test_resistance_starts_from_head_multiplier() {
        let slot = UnitSlotConfig::with_head(head(1000.0, 0.7, 2))
            .fit(0, module(1.0, 0.9, ModuleCategory::Passive))
            .fit(1, module(1.0, 0.8, ModuleCategory::Passive));
        // 0.7 * (1 - 0.1 - 0.2)
        assert!((compose_resistance(&slot, false) - 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_inactive_modules_ignored() {
        let mut slot = UnitSlotConfig::with_head(head(1000.0, 1.0, 1))
            .fit(0, module(1.5, 0.5, ModuleCategory::Passive));
        slot.active[0] = false;
        assert_eq!(compose_power(&slot), 1000.0);
        assert_eq!(compose_resistance(&slot, false), 1.0);
    }

    #[test]
    fn test_passive_only_excludes_active_category() {
        let mut slot = UnitSlotConfig::with_head(head(1000.0, 1.0, 2))
            .fit(0, module(1.0, 0.9, ModuleCategory::Passive))
            .fit(1, module(1.0, 0.5, ModuleCategory::Active));
        slot.active[1] = true;
        assert!((compose_resistance(&slot, false) - 0.4).abs() < 1e-12);
        assert!((compose_resistance(&slot, true) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_stack_unit_multipliers_compounds() {
        let k = 0.7;
        let combined = stack_unit_multipliers([k, k]);
        assert!((combined - k * k).abs() < 1e-12);
        assert!((combined - (2.0 * k - k * k)).abs() > 1e-3);
        assert_eq!(stack_unit_multipliers(std::iter::empty()), 1.0);
    }
}
