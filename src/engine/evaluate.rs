use super::compose::{
    compose_instability, compose_power, compose_resistance, stack_unit_multipliers,
};
use super::gadgets::{accumulate, accumulate_instability};
use super::reversal::{reversal_multiplier, reverse, scanning_slot};
use super::threshold::{compare, required_power};
use super::types::{
    CalculationResult, GadgetUse, ReadingMode, Reversal, ScanSource, SlotContribution,
    TargetObject, UnitConfiguration, UnitInstance, UnitKind, UnitSlotConfig,
};

/// Totals of one vehicle's eligible mounts
struct UnitTally {
    power: f64,
    equipment: f64,
    instability: f64,
}

fn tally_unit(
    unit_index: usize,
    config: &UnitConfiguration,
    kind: &UnitKind,
    breakdown: &mut Vec<SlotContribution>,
) -> UnitTally {
    let mut tally = UnitTally {
        power: 0.0,
        equipment: 1.0,
        instability: 1.0,
    };

    for (slot_index, slot) in config.slots.iter().enumerate() {
        let included = kind.contributes(slot);
        let power = compose_power(slot);
        let resistance = compose_resistance(slot, false);
        if included {
            tally.power += power;
            tally.equipment *= resistance;
            tally.instability *= compose_instability(slot);
        }
        breakdown.push(SlotContribution {
            unit: unit_index,
            slot: slot_index,
            head: slot.head_id().map(str::to_string),
            power,
            resistance_multiplier: resistance,
            included,
        });
    }
    tally
}

/// Apply gadgets, reversal and the threshold comparison to a tallied
/// operation. `scanner` resolves the mount a contaminated reading came from.
fn conclude<'a, F>(
    target: &TargetObject,
    gadgets: &[GadgetUse],
    tally: UnitTally,
    breakdown: Vec<SlotContribution>,
    scanner: F,
) -> CalculationResult
where
    F: Fn(ScanSource) -> Option<&'a UnitSlotConfig>,
{
    let gadget_multiplier = accumulate(gadgets, false);
    let resistance_multiplier = tally.equipment * gadget_multiplier;

    let (effective_resistance, reversal) = match target.mode {
        ReadingMode::Baseline => (target.resistance * resistance_multiplier, None),
        ReadingMode::Contaminated {
            scanned_by,
            gadgets_at_scan,
        } => {
            let multiplier = reversal_multiplier(scanner(scanned_by), gadgets, gadgets_at_scan);
            let baseline_resistance = reverse(target.resistance, multiplier);
            (
                baseline_resistance * resistance_multiplier,
                Some(Reversal {
                    baseline_resistance,
                    multiplier,
                }),
            )
        }
    };

    let required_at_baseline = required_power(target.mass, target.resistance);
    let required_at_effective = required_power(target.mass, effective_resistance);
    let comparison = compare(tally.power, required_at_effective);

    CalculationResult {
        available_power: tally.power,
        equipment_multiplier: tally.equipment,
        gadget_multiplier,
        resistance_multiplier,
        instability_multiplier: tally.instability * accumulate_instability(gadgets),
        effective_resistance,
        required_at_baseline,
        required_at_effective,
        sufficient: comparison.sufficient,
        margin: comparison.margin,
        margin_percent: comparison.margin_percent,
        reversal,
        breakdown,
    }
}

/// Evaluate a single vehicle against `target`.
///
/// Mounts left unstaffed on a crewed vehicle are skipped for both power and
/// resistance. A contaminated reading is reversed using only the scanning
/// mount (the unit index of the scan source is not consulted here).
pub fn evaluate(
    config: &UnitConfiguration,
    target: &TargetObject,
    gadgets: &[GadgetUse],
    kind: &UnitKind,
) -> CalculationResult {
    let mut breakdown = Vec::new();
    let tally = tally_unit(0, config, kind, &mut breakdown);
    conclude(target, gadgets, tally, breakdown, |source| {
        scanning_slot(source, |_| Some(config.slots.as_slice()))
    })
}

/// Evaluate several vehicles working the same rock.
///
/// Power adds up across active vehicles; equipment multipliers compound
/// across them ([`stack_unit_multipliers`]). Gadgets belong to the operation
/// and apply once. The scan source may point at any listed vehicle, active
/// or not.
pub fn evaluate_group(
    units: &[UnitInstance],
    target: &TargetObject,
    gadgets: &[GadgetUse],
) -> CalculationResult {
    if !units.iter().any(|u| u.active) {
        return idle_result(target);
    }

    let mut breakdown = Vec::new();
    let mut power = 0.0;
    let mut instability = 1.0;
    let mut per_unit = Vec::new();

    for (index, unit) in units.iter().enumerate().filter(|(_, u)| u.active) {
        let tally = tally_unit(index, &unit.config, &unit.kind, &mut breakdown);
        power += tally.power;
        instability *= tally.instability;
        per_unit.push(tally.equipment);
    }

    let tally = UnitTally {
        power,
        equipment: stack_unit_multipliers(per_unit),
        instability,
    };
    conclude(target, gadgets, tally, breakdown, |source| {
        scanning_slot(source, |u| units.get(u).map(|unit| unit.config.slots.as_slice()))
    })
}

/// Nobody is lasering: no power, nothing modified, never sufficient.
/// A contaminated reading is not reversed here; the reading stands as read.
fn idle_result(target: &TargetObject) -> CalculationResult {
    let required = required_power(target.mass, target.resistance);
    CalculationResult {
        available_power: 0.0,
        equipment_multiplier: 1.0,
        gadget_multiplier: 1.0,
        resistance_multiplier: 1.0,
        instability_multiplier: 1.0,
        effective_resistance: target.resistance,
        required_at_baseline: required,
        required_at_effective: required,
        sufficient: false,
        margin: 0.0,
        margin_percent: 0.0,
        reversal: None,
        breakdown: Vec::new(),
    }
}
