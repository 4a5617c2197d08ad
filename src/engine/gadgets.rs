use super::types::{Gadget, GadgetUse};

fn participating(gadgets: &[GadgetUse], only_present_at_scan: bool) -> impl Iterator<Item = &Gadget> {
    gadgets
        .iter()
        .filter(|g| g.enabled)
        .filter(move |g| !only_present_at_scan || g.present_at_scan)
        .filter_map(|g| g.gadget.as_ref())
}

/// Combined resistance multiplier of the gadgets on the rock.
/// Gadgets compound: 0.7 and 0.85 give 0.595.
pub fn accumulate(gadgets: &[GadgetUse], only_present_at_scan: bool) -> f64 {
    participating(gadgets, only_present_at_scan)
        .map(|g| g.resistance)
        .product()
}

pub fn accumulate_instability(gadgets: &[GadgetUse]) -> f64 {
    participating(gadgets, false)
        .map(|g| g.instability.unwrap_or(1.0))
        .product()
}
