use super::compose::compose_resistance;
use super::gadgets::accumulate;
use super::types::{GadgetUse, ScanSource, UnitSlotConfig};

/// Recover the baseline resistance from a contaminated `reading`.
///
/// A zero multiplier hands the reading back untouched. That is inherited
/// behavior rather than a physical result; see the flagged test below.
pub fn reverse(reading: f64, multiplier: f64) -> f64 {
    if multiplier == 0.0 {
        reading
    } else {
        reading / multiplier
    }
}

/// Multiplier that was baked into a reading taken by `scanner`.
///
/// Only the scanning mount's passive equipment counts: anything fitted
/// elsewhere, and any active ability, was not affecting the rock when it
/// was scanned. A scanner that cannot be found is treated as neutral.
pub fn reversal_multiplier(
    scanner: Option<&UnitSlotConfig>,
    gadgets: &[GadgetUse],
    gadgets_at_scan: bool,
) -> f64 {
    let equipment = scanner
        .map(|slot| compose_resistance(slot, true))
        .unwrap_or(1.0);
    let gadget = if gadgets_at_scan {
        accumulate(gadgets, true)
    } else {
        1.0
    };
    equipment * gadget
}

/// Look up the scanning mount among `slots` of unit `source.unit`
pub(crate) fn scanning_slot<'a, F>(source: ScanSource, slots_of: F) -> Option<&'a UnitSlotConfig>
where
    F: Fn(usize) -> Option<&'a [UnitSlotConfig]>,
{
    slots_of(source.unit).and_then(|slots| slots.get(source.slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{
        ActivationKind, AttachmentHead, Gadget, ModuleCategory, SubModule,
    };

    fn scanner() -> UnitSlotConfig {
        let mut slot = UnitSlotConfig::with_head(AttachmentHead {
            id: "helix-1".to_string(),
            power: 3150.0,
            resistance: 0.7,
            instability: None,
            slots: 2,
        })
        .fit(
            0,
            SubModule {
                id: "surge".to_string(),
                power: 1.5,
                resistance: 0.85,
                category: ModuleCategory::Active,
                activation: Some(ActivationKind::Stackable),
                duration_secs: Some(15),
                uses: Some(7),
            },
        );
        slot.active[0] = true;
        slot
    }

    #[test]
    fn test_reverse_divides() {
        assert!((reverse(21.0, 0.7) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_round_trip() {
        for &reading in &[0.0, 5.5, 17.5, 42.0, 99.9] {
            for &m in &[0.1, 0.49, 0.7, 1.0, 1.25, 3.0] {
                let baseline = reverse(reading, m);
                assert!((baseline * m - reading).abs() < 1e-9);
            }
        }
    }

    /// Inherited fallback: a zero multiplier passes the reading through.
    /// Not a verified contract; kept so any change to it is deliberate.
    #[test]
    fn test_zero_multiplier_passes_reading_through_flagged_legacy() {
        assert_eq!(reverse(42.0, 0.0), 42.0);
    }

    #[test]
    fn test_reversal_ignores_active_abilities() {
        let slot = scanner();
        let m = reversal_multiplier(Some(&slot), &[], false);
        assert!((m - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_missing_scanner_is_neutral() {
        assert_eq!(reversal_multiplier(None, &[], false), 1.0);
    }

    #[test]
    fn test_gadgets_only_count_when_flagged_at_scan() {
        let slot = scanner();
        let mut sabir = GadgetUse::new(Gadget {
            id: "sabir".to_string(),
            resistance: 0.5,
            instability: None,
        });
        sabir.present_at_scan = true;
        let later = GadgetUse::new(Gadget {
            id: "boremax".to_string(),
            resistance: 0.9,
            instability: None,
        });
        let gadgets = vec![sabir, later];

        assert!((reversal_multiplier(Some(&slot), &gadgets, false) - 0.7).abs() < 1e-12);
        assert!((reversal_multiplier(Some(&slot), &gadgets, true) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_scanning_slot_lookup() {
        let units = vec![vec![UnitSlotConfig::empty()], vec![scanner()]];
        let slots_of = |u: usize| units.get(u).map(|s| s.as_slice());

        let found = scanning_slot(ScanSource { unit: 1, slot: 0 }, slots_of);
        assert_eq!(found.and_then(|s| s.head_id()), Some("helix-1"));
        assert!(scanning_slot(ScanSource { unit: 1, slot: 3 }, slots_of).is_none());
        assert!(scanning_slot(ScanSource { unit: 9, slot: 0 }, slots_of).is_none());
    }
}
