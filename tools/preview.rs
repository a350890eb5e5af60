/// Preview — print weapons as item cards or JSON, or browse them interactively.
///
/// Usage: preview [--id <id>] [--version <n>] [--rarity <tier>] [--variants]
///                [--json] [--config <path>] [--shell]
///
/// Shell commands:
///   forge <id> [rarity]   — build at the current version
///   variants <id>         — one build per rarity tier
///   version <n>           — switch catalog version
///   json                  — toggle JSON output
///   help                  — list commands
///   quit                  — exit

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;
use weapon_forge::core::pipeline::WeaponEngine;
use weapon_forge::schema::rarity::Rarity;
use weapon_forge::schema::weapon::WeaponView;

struct Options {
    id: Option<String>,
    version: Option<usize>,
    rarity: Option<Rarity>,
    variants: bool,
    json: bool,
    config: Option<String>,
    shell: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }
    let opts = parse_args(&args);

    let mut builder = WeaponEngine::builder();
    if let Some(ref path) = opts.config {
        builder = builder.config_path(path);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let version = opts.version.unwrap_or_else(|| engine.latest_version_num());

    if opts.shell {
        run_shell(&engine, version, opts.json);
        return;
    }

    let Some(id) = opts.id.as_deref() else {
        eprintln!("ERROR: --id is required outside the shell");
        std::process::exit(1);
    };
    let result = if opts.variants {
        engine.forge_variants(id, version)
    } else {
        engine.forge_with_rarity(id, version, opts.rarity).map(|w| vec![w])
    };
    match result {
        Ok(views) => {
            for view in &views {
                print_view(view, opts.json);
            }
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        id: None,
        version: None,
        rarity: None,
        variants: false,
        json: false,
        config: None,
        shell: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--id" if i + 1 < args.len() => {
                i += 1;
                opts.id = Some(args[i].clone());
            }
            "--version" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(v) => opts.version = Some(v),
                    Err(_) => fail(&format!("'{}' is not a version number", args[i])),
                }
            }
            "--rarity" if i + 1 < args.len() => {
                i += 1;
                match Rarity::parse(&args[i]) {
                    Some(r) => opts.rarity = Some(r),
                    None => fail(&format!("unknown rarity '{}'", args[i])),
                }
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                opts.config = Some(args[i].clone());
            }
            "--variants" => opts.variants = true,
            "--json" => opts.json = true,
            "--shell" => opts.shell = true,
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    opts
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    std::process::exit(1);
}

fn run_shell(engine: &WeaponEngine, mut version: usize, mut json: bool) {
    println!(
        "Catalog versions 0..={}, using {}",
        engine.latest_version_num(),
        version
    );
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("forge> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            continue;
        };

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "help" | "h" | "?" => print_help(),
            "json" => {
                json = !json;
                println!("JSON output {}", if json { "on" } else { "off" });
            }
            "version" => match parts.get(1).and_then(|v| v.parse::<usize>().ok()) {
                Some(v) if v <= engine.latest_version_num() => {
                    version = v;
                    println!("Using version {}", version);
                }
                _ => println!("Usage: version <0..={}>", engine.latest_version_num()),
            },
            "forge" => {
                let Some(id) = parts.get(1) else {
                    println!("Usage: forge <id> [rarity]");
                    continue;
                };
                let rarity = match parts.get(2) {
                    Some(r) => match Rarity::parse(r) {
                        Some(r) => Some(r),
                        None => {
                            println!("Unknown rarity: {}", r);
                            continue;
                        }
                    },
                    None => None,
                };
                match engine.forge_with_rarity(id, version, rarity) {
                    Ok(view) => print_view(&view, json),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "variants" => {
                let Some(id) = parts.get(1) else {
                    println!("Usage: variants <id>");
                    continue;
                };
                match engine.forge_variants(id, version) {
                    Ok(views) => views.iter().for_each(|v| print_view(v, json)),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            other => println!("Unknown command: {}. Type 'help'.", other),
        }
    }
}

fn print_view(view: &WeaponView, json: bool) {
    if json {
        match serde_json::to_string_pretty(view) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("ERROR: {}", e),
        }
        return;
    }

    let themes: Vec<&str> = view.themes.iter().map(|t| t.name()).collect();
    println!("=== {} (v{}) ===", view.id, view.version);
    println!(
        "{} {} [{}], roll {:.4}",
        view.rarity,
        view.shape,
        themes.join(", "),
        view.rarity_roll
    );
    println!("Damage: {}", view.damage);
    println!("{}", view.description);
    if let Some(ref sentience) = view.sentience {
        println!("{}", sentience.summary());
    }
    if !view.active_powers.is_empty() {
        println!(
            "Charges: {} (recharges {})",
            view.max_charges,
            view.recharge.as_deref().unwrap_or("never")
        );
        for power in &view.active_powers {
            let cost = match power.cost.charges() {
                Some(1) => "1 charge".to_string(),
                Some(n) => format!("{} charges", n),
                None => "at will".to_string(),
            };
            println!("  * {} ({})", power.desc, cost);
            for note in &power.notes {
                println!("      {}", note);
            }
        }
    }
    for power in &view.passive_powers {
        println!("  - {}", power.desc);
    }
    println!();
}

fn print_usage() {
    println!("Usage: preview [--id <id>] [--version <n>] [--rarity <tier>] [--variants]");
    println!("               [--json] [--config <path>] [--shell]");
}

fn print_help() {
    println!("Commands:");
    println!("  forge <id> [rarity]  build at the current version");
    println!("  variants <id>        one build per rarity tier");
    println!("  version <n>          switch catalog version");
    println!("  json                 toggle JSON output");
    println!("  quit                 exit");
}
