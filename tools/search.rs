/// Search — brute-force parallel search for weapon ids matching a filter.
///
/// Usage: search [--prefix <p>] [--count <n>] [--version <n>] [--rarity <tier>]
///               [--theme <name>] [--shape <name>] [--feature <id>]
///               [--sentient] [--limit <n>]
///
/// Ids are `{prefix}{i}` for i in 0..count. Each worker builds its weapons
/// with its own RNG against the shared catalogs.

use std::process;

use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use weapon_forge::core::pipeline::WeaponEngine;
use weapon_forge::schema::rarity::Rarity;
use weapon_forge::schema::weapon::WeaponView;

#[derive(Default)]
struct Filter {
    rarity: Option<Rarity>,
    theme: Option<String>,
    shape: Option<String>,
    feature: Option<String>,
    sentient: bool,
}

impl Filter {
    fn accepts(&self, view: &WeaponView) -> bool {
        self.rarity.map_or(true, |r| view.rarity == r)
            && self
                .theme
                .as_deref()
                .map_or(true, |t| view.themes.iter().any(|x| x.name() == t))
            && self.shape.as_deref().map_or(true, |s| view.shape == s)
            && self
                .feature
                .as_deref()
                .map_or(true, |f| view.features.iter().any(|x| x.as_str() == f))
            && (!self.sentient || view.sentience.is_some())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut prefix = "weapon-".to_string();
    let mut count: usize = 10_000;
    let mut version: Option<usize> = None;
    let mut limit: usize = 20;
    let mut filter = Filter::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--prefix" if i + 1 < args.len() => {
                i += 1;
                prefix = args[i].clone();
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(count);
            }
            "--version" if i + 1 < args.len() => {
                i += 1;
                version = args[i].parse().ok();
            }
            "--limit" if i + 1 < args.len() => {
                i += 1;
                limit = args[i].parse().unwrap_or(limit);
            }
            "--rarity" if i + 1 < args.len() => {
                i += 1;
                filter.rarity = Rarity::parse(&args[i]);
                if filter.rarity.is_none() {
                    eprintln!("Unknown rarity: {}", args[i]);
                    process::exit(1);
                }
            }
            "--theme" if i + 1 < args.len() => {
                i += 1;
                filter.theme = Some(args[i].to_lowercase());
            }
            "--shape" if i + 1 < args.len() => {
                i += 1;
                filter.shape = Some(args[i].clone());
            }
            "--feature" if i + 1 < args.len() => {
                i += 1;
                filter.feature = Some(args[i].clone());
            }
            "--sentient" => filter.sentient = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let engine = match WeaponEngine::builder().build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };
    let version = version.unwrap_or_else(|| engine.latest_version_num());

    let mut hits: Vec<(usize, WeaponView)> = (0..count)
        .into_par_iter()
        .filter_map(|n| {
            let id = format!("{}{}", prefix, n);
            match engine.forge(&id, version) {
                Ok(view) if filter.accepts(&view) => Some((n, view)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("{}: {}", id, e);
                    None
                }
            }
        })
        .collect();
    hits.sort_by_key(|(n, _)| *n);

    println!(
        "{} of {} ids match at version {}",
        hits.len(),
        count,
        version
    );
    for (_, view) in hits.iter().take(limit) {
        let themes: Vec<&str> = view.themes.iter().map(|t| t.name()).collect();
        println!(
            "  {:<20} {:<10} {:<20} [{}]",
            view.id,
            view.rarity.name(),
            view.shape,
            themes.join(", ")
        );
    }
}

fn print_usage() {
    println!("Usage: search [--prefix <p>] [--count <n>] [--version <n>] [--rarity <tier>]");
    println!("              [--theme <name>] [--shape <name>] [--feature <id>]");
    println!("              [--sentient] [--limit <n>]");
}
