use super::types::{ActivationKind, ModuleCategory, UnitConfiguration};

/// One sub-module position of a configuration, flattened across mounts.
///
/// Index in the flattened list is the handle used by [`toggle`]; `slot` and
/// `position` point back to the owning mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInstance {
    pub slot: usize,
    pub position: usize,
    pub category: Option<ModuleCategory>, // None for an empty position
    pub activation: Option<ActivationKind>,
}

impl ModuleInstance {
    fn is_sustained(&self) -> bool {
        self.category == Some(ModuleCategory::Active)
            && self.activation == Some(ActivationKind::Sustained)
    }
}

/// Flatten every sub-module position of `config`, mount by mount.
pub fn flatten_modules(config: &UnitConfiguration) -> Vec<ModuleInstance> {
    config
        .slots
        .iter()
        .enumerate()
        .flat_map(|(slot_index, slot)| {
            slot.modules
                .iter()
                .enumerate()
                .map(move |(position, module)| ModuleInstance {
                    slot: slot_index,
                    position,
                    category: module.as_ref().map(|m| m.category),
                    activation: module.as_ref().and_then(|m| m.activation),
                })
        })
        .collect()
}

/// Current flags of `config`, in [`flatten_modules`] order
pub fn active_flags(config: &UnitConfiguration) -> Vec<bool> {
    config
        .slots
        .iter()
        .flat_map(|slot| (0..slot.modules.len()).map(move |i| slot.is_module_active(i)))
        .collect()
}

/// Flip the flag at `target`.
///
/// Switching a sustained module on switches every other sustained module of
/// the configuration off. Every other transition touches only `target`.
/// An out-of-range `target` returns the flags unchanged.
pub fn toggle(modules: &[ModuleInstance], flags: &[bool], target: usize) -> Vec<bool> {
    let mut next = flags.to_vec();
    let Some(current) = next.get(target).copied() else {
        return next;
    };
    let turning_on = !current;
    next[target] = turning_on;

    let cascades = modules.get(target).is_some_and(|m| m.is_sustained());
    if turning_on && cascades {
        for (i, module) in modules.iter().enumerate() {
            if i != target && module.is_sustained() {
                if let Some(flag) = next.get_mut(i) {
                    *flag = false;
                }
            }
        }
    }
    next
}

/// Copy of `config` carrying `flags` (in [`flatten_modules`] order).
/// Missing trailing flags leave the original values in place.
pub fn with_active_flags(config: &UnitConfiguration, flags: &[bool]) -> UnitConfiguration {
    let mut next = config.clone();
    let mut index = 0;
    for slot in &mut next.slots {
        for position in 0..slot.modules.len() {
            if let Some(&flag) = flags.get(index) {
                if position < slot.active.len() {
                    slot.active[position] = flag;
                } else {
                    slot.active.resize(position, false);
                    slot.active.push(flag);
                }
            }
            index += 1;
        }
    }
    next
}
