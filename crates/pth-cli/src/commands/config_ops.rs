use std::fs;

use pth_core::options::{options_schema, parse_options_toml};
use pth_core::rules::TableKind;
use pth_core::RuleSet;

use super::die;

pub fn rules_export() {
    print!("{}", pth_core::rules::default_toml());
}

pub fn rules_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let rules = die!(RuleSet::from_toml(&content), "Error: {}");
    let checked = die!(rules.verify_total(), "Error: {}");
    let counts: Vec<String> = TableKind::ALL
        .iter()
        .map(|&kind| format!("{}={}", kind, rules.table(kind).leaf_count()))
        .collect();
    println!("OK: {}, {checked} positions covered", counts.join(", "));
}

pub fn options_export() {
    print!("{}", pth_core::options::default_toml());
}

pub fn options_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let opts = die!(parse_options_toml(&content), "Error: {}");
    println!(
        "OK: tone-notation={}, extended={}, checked-tone-policy={}, chang-chuan-initial={}",
        opts.tone_notation, opts.extended, opts.checked_tone_policy, opts.chang_chuan_initial
    );
}

pub fn options_show(json: bool) {
    let schema = options_schema();
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&schema), "JSON error: {}")
        );
        return;
    }
    for spec in &schema {
        let gate = if spec.extended_only { " (extended)" } else { "" };
        println!("{} [{}]{gate}  default: {}", spec.key, spec.label, spec.default);
        for choice in &spec.choices {
            let marker = if choice.value == spec.default { "*" } else { " " };
            println!("  {marker} {:<34} {}", choice.value, choice.label);
        }
    }
}
