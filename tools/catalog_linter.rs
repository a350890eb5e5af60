/// Catalog Linter — static checks over every built-in catalog version.
///
/// Usage: catalog_linter [--config <path>]
///
/// Errors: duplicate ids, attachments to unknown ids, theme/rarity
/// combinations that can't fill their budget. Warnings: `never` entries
/// nothing attaches.

use std::collections::HashSet;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use weapon_forge::catalog::{Catalog, Pool};
use weapon_forge::core::config::ForgeConfig;
use weapon_forge::core::pipeline::{Draft, WeaponEngine};
use weapon_forge::schema::power::ActivePower;
use weapon_forge::schema::rarity::Rarity;
use weapon_forge::schema::weapon::Weapon;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!("Usage: catalog_linter [--config <path>]");
        process::exit(0);
    }

    let mut builder = WeaponEngine::builder();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            i += 1;
            builder = builder.config_path(&args[i]);
        }
        i += 1;
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for version in 0..=engine.latest_version_num() {
        let catalog = match engine.catalog(version) {
            Ok(catalog) => catalog,
            Err(e) => {
                errors.push(format!("v{}: {}", version, e));
                continue;
            }
        };
        let entries: usize = catalog.summaries().iter().map(|s| s.ids.len()).sum();
        println!("  v{}: {} entries", version, entries);
        lint_version(version, &catalog, engine.config(), &mut errors, &mut warnings);
    }

    println!("\n=== Catalog Lint Report ===\n");
    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }
    for warning in &warnings {
        println!("WARNING: {}", warning);
    }
    for error in &errors {
        println!("ERROR: {}", error);
    }
    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    process::exit(if errors.is_empty() { 0 } else { 1 });
}

fn lint_version(
    version: usize,
    catalog: &Arc<Catalog>,
    config: &ForgeConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let summaries = catalog.summaries();

    let mut seen = HashSet::new();
    let mut attached = HashSet::new();
    for summary in &summaries {
        for id in &summary.ids {
            if !seen.insert(id.as_str()) {
                errors.push(format!("v{}: duplicate id '{}' ({})", version, id, summary.name));
            }
        }
        for (source, target) in &summary.attachments {
            attached.insert(target.as_str());
            if !catalog.contains_id(target.as_str()) {
                errors.push(format!(
                    "v{}: '{}' attaches unknown id '{}'",
                    version, source, target
                ));
            }
        }
    }
    for summary in &summaries {
        for id in &summary.never {
            if !attached.contains(id.as_str()) {
                warnings.push(format!(
                    "v{}: '{}' is never drawn and nothing attaches it",
                    version, id
                ));
            }
        }
    }

    for theme in catalog.themes.elements() {
        let Some(theme) = theme.payload.as_value().copied() else {
            continue;
        };
        for rarity in Rarity::ALL {
            let budget = config.budget(rarity);
            let draft = Draft {
                catalog: Arc::clone(catalog),
                weapon: Weapon::new("lint", version, rarity, 0.0).with_themes([theme]),
            };
            let mut short = |category: &str, have: usize, need: usize| {
                if have < need {
                    errors.push(format!(
                        "v{}: {} {} has {} eligible {} (needs {})",
                        version, rarity, theme, have, category, need
                    ));
                }
            };
            short("shapes", catalog.shapes.eligible(&draft).len(), 1);
            short("hard materials", catalog.hard_materials.eligible(&draft).len(), 1);
            short("grip materials", catalog.grip_materials.eligible(&draft).len(), 1);
            short(
                "passive powers",
                catalog.passive_powers.eligible(&draft).len(),
                budget.passives as usize,
            );
            short(
                "charged active powers",
                charged_actives(&catalog.active_powers, &draft),
                budget.actives as usize,
            );
        }
    }
}

/// Eligible actives that may cost charges. Deferred payloads count.
fn charged_actives(pool: &Pool<ActivePower>, draft: &Draft) -> usize {
    pool.eligible(draft)
        .iter()
        .filter(|e| match e.payload.as_value() {
            Some(power) => power.cost.charges().is_some(),
            None => true,
        })
        .count()
}
