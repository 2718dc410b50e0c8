//! Fieldgate CLI
//!
//! A demonstration CLI that runs JSON payloads through a sample `signup`
//! record type.

use anyhow::{bail, Context};
use fieldgate::prelude::*;
use std::path::Path;

/// Sample record type used by the CLI.
struct Signup;

impl RecordType for Signup {
    const NAME: &'static str = "signup";

    fn define(schema: &mut RegistryBuilder) {
        schema
            .register(
                "username",
                ValidationRule::list([
                    ValidationRule::with_args(
                        "length",
                        ValidatorArgs::new().with("min", 3i64).with("max", 20i64),
                    ),
                    ValidationRule::with_args(
                        "exclusion",
                        ValidatorArgs::new().with("in", vec!["admin", "root"]),
                    ),
                ]),
            )
            .validates_with("email", "format", ValidatorArgs::new().with("contains", "@"))
            .validates_with(
                "age",
                "number",
                ValidatorArgs::new().with("greater_than_or_equal_to", 13i64),
            )
            .validates_with(
                "plan",
                "inclusion",
                ValidatorArgs::new().with("in", vec!["free", "pro"]),
            )
            .validates("terms", "acceptance");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("fieldgate");

    if args.len() < 2 {
        print_usage(program);
        return;
    }

    let result = match args[1].as_str() {
        "rules" => list_rules(),
        "check" => check_payload(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(true)
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            Ok(false)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(2);
        }
    }
}

fn print_usage(program: &str) {
    println!("Fieldgate v{}", fieldgate::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  rules                     List the validators declared on 'signup'");
    println!("  check <payload.json>      Permit and validate a payload");
    println!("  help                      Show this help message");
    println!();
    println!("Check options:");
    println!("  --required <a,b>    Fields that must be present (default: username,email)");
    println!("  --optional <c,d>    Fields that may be set (default: age,plan,terms)");
    println!("  --base <file.json>  Existing record the payload updates");
    println!("  --config <file>     Engine configuration (TOML)");
}

fn list_rules() -> anyhow::Result<bool> {
    let registry = RegistryCatalog::global()
        .registry::<Signup>()
        .context("signup record type is misdeclared")?;
    println!("{}", serde_json::to_string_pretty(&*registry)?);
    Ok(true)
}

fn check_payload(args: &[String]) -> anyhow::Result<bool> {
    let Some(payload_path) = args.first() else {
        bail!("Please specify a payload file");
    };

    let mut required = split_fields("username,email");
    let mut optional = split_fields("age,plan,terms");
    let mut base = Record::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--required" if i + 1 < args.len() => {
                required = split_fields(&args[i + 1]);
                i += 2;
            }
            "--optional" if i + 1 < args.len() => {
                optional = split_fields(&args[i + 1]);
                i += 2;
            }
            "--base" if i + 1 < args.len() => {
                base = read_json(Path::new(&args[i + 1]))?
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect();
                i += 2;
            }
            "--config" if i + 1 < args.len() => {
                let config = EngineConfig::from_path(&args[i + 1])?;
                if RegistryCatalog::install(RegistryCatalog::default().with_config(config)).is_err() {
                    bail!("Catalog already initialised; --config must come first");
                }
                i += 2;
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    let payload = Payload::from_json(serde_json::Value::Object(read_json(Path::new(payload_path))?));
    let draft = Signup::permit_with(DraftRecord::new(base), &payload, &required, &optional);

    println!("{}", serde_json::to_string_pretty(&draft)?);
    if draft.is_valid() {
        eprintln!("✓ Payload accepted with {} change(s)", draft.changes().len());
        Ok(true)
    } else {
        eprintln!("✗ Payload rejected:");
        for message in draft.full_messages() {
            eprintln!("  • {}", message);
        }
        Ok(false)
    }
}

fn split_fields(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match serde_json::from_str(&text)? {
        serde_json::Value::Object(obj) => Ok(obj),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}
