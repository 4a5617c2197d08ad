use crate::engine::{ActivationKind, AttachmentHead, Gadget, ModuleCategory, SubModule, UnitKind};

fn head(id: &str, power: f64, resistance: f64, instability: Option<f64>, slots: usize) -> AttachmentHead {
    AttachmentHead {
        id: id.to_string(),
        power,
        resistance,
        instability,
        slots,
    }
}

fn passive(id: &str, power: f64, resistance: f64) -> SubModule {
    SubModule {
        id: id.to_string(),
        power,
        resistance,
        category: ModuleCategory::Passive,
        activation: None,
        duration_secs: None,
        uses: None,
    }
}

fn active(
    id: &str,
    power: f64,
    resistance: f64,
    activation: ActivationKind,
    duration_secs: u32,
    uses: u32,
) -> SubModule {
    SubModule {
        id: id.to_string(),
        power,
        resistance,
        category: ModuleCategory::Active,
        activation: Some(activation),
        duration_secs: Some(duration_secs),
        uses: Some(uses),
    }
}

fn gadget(id: &str, resistance: f64, instability: Option<f64>) -> Gadget {
    Gadget {
        id: id.to_string(),
        resistance,
        instability,
    }
}

pub(super) fn heads() -> Vec<AttachmentHead> {
    vec![
        // Size 1
        head("arbor-mh1", 1890.0, 1.25, Some(0.65), 1),
        head("helix-1", 3150.0, 0.7, None, 2),
        head("hofstede-s1", 2100.0, 0.7, Some(1.1), 1),
        head("impact-1", 2100.0, 1.1, Some(0.9), 2),
        head("klein-s1", 2220.0, 0.55, Some(1.35), 0),
        head("lancet-mh1", 2520.0, 1.0, Some(0.9), 1),
        head("pitman", 3150.0, 1.25, Some(1.35), 2),
        // Size 2
        head("arbor-mh2", 2400.0, 1.25, Some(0.65), 2),
        head("helix-2", 4080.0, 0.7, None, 3),
        head("hofstede-s2", 3360.0, 0.7, Some(1.1), 2),
        head("impact-2", 3360.0, 1.1, Some(0.9), 3),
        head("klein-s2", 3600.0, 0.55, Some(1.35), 1),
        head("lancet-mh2", 3600.0, 1.0, Some(0.9), 2),
    ]
}

pub(super) fn modules() -> Vec<SubModule> {
    vec![
        passive("focus-1", 0.85, 1.0),
        passive("focus-2", 0.9, 1.0),
        passive("focus-3", 0.95, 1.0),
        passive("rieger-1", 1.15, 1.0),
        passive("rieger-2", 1.2, 1.0),
        passive("rieger-3", 1.25, 1.0),
        passive("vaux-3", 1.15, 1.0),
        active("brandt", 1.35, 1.15, ActivationKind::Stackable, 90, 5),
        active("forel", 1.0, 1.15, ActivationKind::Sustained, 60, 6),
        active("lifeline", 1.0, 0.85, ActivationKind::Sustained, 60, 3),
        active("optimum", 0.85, 0.9, ActivationKind::Sustained, 60, 5),
        active("rime", 0.85, 0.75, ActivationKind::Stackable, 20, 10),
        active("stampede", 1.35, 1.0, ActivationKind::Sustained, 30, 6),
        active("surge", 1.5, 0.85, ActivationKind::Stackable, 15, 7),
    ]
}

pub(super) fn gadgets() -> Vec<Gadget> {
    vec![
        gadget("boremax", 1.1, Some(0.7)),
        gadget("okunis", 1.0, Some(0.8)),
        gadget("optimax", 1.0, Some(0.7)),
        gadget("sabir", 0.5, Some(1.15)),
        gadget("stalwart", 1.0, Some(0.65)),
        gadget("waveshift", 1.0, Some(0.65)),
    ]
}

pub(super) fn vehicles() -> Vec<UnitKind> {
    vec![
        UnitKind::new("prospector", 1, false),
        UnitKind::new("mole", 3, true),
        UnitKind::new("golem", 1, false),
        UnitKind::new("roc", 1, false),
        UnitKind::new("multitool", 1, false),
    ]
}
