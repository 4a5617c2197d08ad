use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::catalog::Catalog;
use crate::engine::{ActivationKind, CalculationResult, ModuleCategory, SubModule, TargetObject};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a power figure in compact notation (1.5k, 2.3M, 847)
pub fn format_power(power: f64) -> String {
    let magnitude = power.abs();
    let formatted = if magnitude >= 1_000_000.0 {
        format!("{:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", magnitude / 1_000.0)
    } else {
        format!("{:.0}", magnitude)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    let trimmed = formatted.replace(".0M", "M").replace(".0k", "k");

    if power < 0.0 && trimmed != "0" {
        format!("-{}", trimmed)
    } else {
        trimmed
    }
}

/// Format a multiplier as a signed percentage change (0.7 -> "-30%")
pub fn format_modifier(multiplier: f64) -> String {
    let percent = (multiplier - 1.0) * 100.0;
    if percent.abs() < 0.05 {
        "±0%".to_string()
    } else {
        format!("{:+.1}%", percent).replace(".0%", "%")
    }
}

/// One-line verdict: "CAN BREAK  3.2k / 2.4k power (+31.5%)"
pub fn format_summary(result: &CalculationResult, use_colors: bool) -> String {
    let verdict = if result.sufficient {
        "CAN BREAK"
    } else {
        "CANNOT BREAK"
    };
    let figures = format!(
        "{} / {} power ({:+.1}%)",
        format_power(result.available_power),
        format_power(result.required_at_effective),
        result.margin_percent
    );

    if use_colors {
        if result.sufficient {
            format!("{}  {}", verdict.green().bold(), figures)
        } else {
            format!("{}  {}", verdict.red().bold(), figures)
        }
    } else {
        format!("{}  {}", verdict, figures)
    }
}

/// Detailed multi-line report of an evaluation
pub fn format_result(
    result: &CalculationResult,
    target: &TargetObject,
    use_colors: bool,
) -> String {
    let mut lines = vec![format_summary(result, use_colors), String::new()];

    lines.push(format!(
        "  Rock: {:.0} mass, {:.2}% resistance read",
        target.mass, target.resistance
    ));
    if let Some(reversal) = result.reversal {
        lines.push(format!(
            "  Baseline resistance: {:.2}% (reading / {:.4})",
            reversal.baseline_resistance, reversal.multiplier
        ));
    }
    lines.push(format!(
        "  Modifiers: equipment {}, gadgets {}, combined {}",
        format_modifier(result.equipment_multiplier),
        format_modifier(result.gadget_multiplier),
        format_modifier(result.resistance_multiplier)
    ));
    lines.push(format!(
        "  Effective resistance: {:.2}%",
        result.effective_resistance
    ));
    lines.push(format!(
        "  Instability: {}",
        format_modifier(result.instability_multiplier)
    ));
    lines.push(format!(
        "  Power: {:.1} available, {:.1} required ({:.1} unmodified)",
        result.available_power, result.required_at_effective, result.required_at_baseline
    ));
    lines.push(format!(
        "  Margin: {:+.1} ({:+.2}%)",
        result.margin, result.margin_percent
    ));

    if !result.breakdown.is_empty() {
        lines.push(String::new());
        lines.push(format_breakdown(result, use_colors));
    }

    lines.join("\n")
}

/// Per-mount contributions, one line each
pub fn format_breakdown(result: &CalculationResult, use_colors: bool) -> String {
    result
        .breakdown
        .iter()
        .map(|c| {
            let label = format!("  [{}:{}]", c.unit, c.slot);
            let head = c.head.as_deref().unwrap_or("(empty)");
            let line = format!(
                "{} {:<12} {:>7} power  {} resistance",
                label,
                head,
                format_power(c.power),
                format_modifier(c.resistance_multiplier)
            );
            match (c.included, use_colors) {
                (true, _) => line,
                (false, true) => format!("{} {}", line.dimmed(), "(no crew)".dimmed()),
                (false, false) => format!("{} (no crew)", line),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON for scripting
pub fn format_json(result: &CalculationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}

fn describe_module(module: &SubModule) -> String {
    let kind = match (module.category, module.activation) {
        (ModuleCategory::Passive, _) => "passive".to_string(),
        (ModuleCategory::Active, Some(ActivationKind::Stackable)) => "active, stackable".to_string(),
        (ModuleCategory::Active, Some(ActivationKind::Sustained)) => "active, sustained".to_string(),
        (ModuleCategory::Active, None) => "active".to_string(),
    };
    let mut extra = Vec::new();
    if let Some(secs) = module.duration_secs {
        extra.push(format!("{}s", secs));
    }
    if let Some(uses) = module.uses {
        extra.push(format!("{} uses", uses));
    }
    if extra.is_empty() {
        kind
    } else {
        format!("{}; {}", kind, extra.join(", "))
    }
}

/// List the catalog grouped by kind
pub fn format_catalog(catalog: &Catalog, use_colors: bool) -> String {
    let heading = |s: &str| {
        if use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };

    let mut lines = vec![heading("Heads")];
    for head in &catalog.heads {
        lines.push(format!(
            "  {:<14} {:>6} power  {:>7} resistance  {} slots",
            head.id,
            format_power(head.power),
            format_modifier(head.resistance),
            head.slots
        ));
    }

    lines.push(heading("Modules"));
    for module in &catalog.modules {
        lines.push(format!(
            "  {:<14} {:>7} power  {:>7} resistance  ({})",
            module.id,
            format_modifier(module.power),
            format_modifier(module.resistance),
            describe_module(module)
        ));
    }

    lines.push(heading("Gadgets"));
    for gadget in &catalog.gadgets {
        lines.push(format!(
            "  {:<14} {:>7} resistance  {:>7} instability",
            gadget.id,
            format_modifier(gadget.resistance),
            format_modifier(gadget.instability.unwrap_or(1.0))
        ));
    }

    lines.push(heading("Vehicles"));
    for vehicle in &catalog.vehicles {
        let crew = if vehicle.requires_crew {
            ", crewed"
        } else {
            ""
        };
        lines.push(format!("  {:<14} {} mounts{}", vehicle.id, vehicle.mounts, crew));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate, AttachmentHead, UnitConfiguration, UnitKind, UnitSlotConfig};

    fn sample_result() -> (CalculationResult, TargetObject) {
        let config = UnitConfiguration::new(vec![UnitSlotConfig::with_head(AttachmentHead {
            id: "test".to_string(),
            power: 1000.0,
            resistance: 0.7,
            instability: None,
            slots: 0,
        })]);
        let target = TargetObject::baseline(10000.0, 25.0);
        let result = evaluate(&config, &target, &[], &UnitKind::new("prospector", 1, false));
        (result, target)
    }

    #[test]
    fn test_format_power_small() {
        assert_eq!(format_power(0.0), "0");
        assert_eq!(format_power(847.0), "847");
        assert_eq!(format_power(999.0), "999");
    }

    #[test]
    fn test_format_power_thousands() {
        assert_eq!(format_power(1000.0), "1k");
        assert_eq!(format_power(1500.0), "1.5k");
        assert_eq!(format_power(3600.0), "3.6k");
        assert_eq!(format_power(2424.24), "2.4k");
    }

    #[test]
    fn test_format_power_millions() {
        assert_eq!(format_power(1_000_000.0), "1M");
        assert_eq!(format_power(2_300_000.0), "2.3M");
    }

    #[test]
    fn test_format_power_negative() {
        assert_eq!(format_power(-1424.24), "-1.4k");
        assert_eq!(format_power(-0.2), "0");
    }

    #[test]
    fn test_format_modifier() {
        assert_eq!(format_modifier(0.7), "-30%");
        assert_eq!(format_modifier(1.25), "+25%");
        assert_eq!(format_modifier(1.0), "±0%");
        assert_eq!(format_modifier(0.595), "-40.5%");
    }

    #[test]
    fn test_summary_without_colors() {
        let (result, _) = sample_result();
        assert!(format_summary(&result, false).starts_with("CANNOT BREAK  1k / 2.4k power (-58."));
    }

    #[test]
    fn test_result_report_mentions_key_figures() {
        let (result, target) = sample_result();
        let report = format_result(&result, &target, false);
        assert!(report.contains("Effective resistance: 17.50%"));
        assert!(report.contains("Margin: -1424.2"));
        assert!(!report.contains("Baseline resistance"));
        assert!(report.contains("[0:0] test"));
    }

    #[test]
    fn test_breakdown_marks_uncrewed_mounts() {
        let (mut result, _) = sample_result();
        result.breakdown[0].included = false;
        assert!(format_breakdown(&result, false).ends_with("(no crew)"));
    }

    #[test]
    fn test_json_output() {
        let (result, _) = sample_result();
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sufficient"], serde_json::Value::Bool(false));
        assert_eq!(value["available_power"], 1000.0);
        assert!(value.get("reversal").is_none());
    }

    #[test]
    fn test_catalog_listing() {
        let listing = format_catalog(&Catalog::builtin(), false);
        assert!(listing.starts_with("Heads"));
        assert!(listing.contains("helix-1"));
        assert!(listing.contains("active, sustained"));
        assert!(listing.contains("3 mounts, crewed"));
    }
}
