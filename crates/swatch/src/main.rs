//! Swatch - compile nested style declarations to flat CSS
//!
//! Usage: swatch [OPTIONS] <FILE>

use std::env;
use std::fs;
use std::process::ExitCode;

use serde::Serialize;
use serde_json::{Map, Value as Json};

use swatch_css::{load_declarations, RenderedStyle};
use swatch_style::{StyleConfig, StyleDef};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Compile(Options),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Declaration file; the built-in demo when absent
    file: Option<String>,
    /// Input record file
    input: Option<String>,
    prefix: Option<String>,
    no_memo: bool,
    json: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("swatch");

    match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("Swatch {}", VERSION);
            ExitCode::SUCCESS
        }
        Ok(Command::Compile(options)) => {
            if let Err(e) = run(&options) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Swatch {} - nested style declarations to flat CSS

USAGE:
    {} [OPTIONS] <FILE>
    {} --demo

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version information
    --demo              Compile a built-in example
    --input <FILE>      JSON input record for dynamic values (default: {{}})
    --prefix <PREFIX>   Class name prefix (default: css)
    --no-memo           Give every declaration its own class
    --json              Print a JSON report

FILE holds one JSON declaration object or an array of them.
"#,
        VERSION, program, program
    );
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut demo = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--demo" => demo = true,
            "--input" => {
                let path = iter.next().ok_or("--input needs a file")?;
                options.input = Some(path.clone());
            }
            "--prefix" => {
                let prefix = iter.next().ok_or("--prefix needs a value")?;
                options.prefix = Some(prefix.clone());
            }
            "--no-memo" => options.no_memo = true,
            "--json" => options.json = true,
            flag if flag.starts_with('-') => return Err(format!("Unknown option: {}", flag)),
            path => {
                if options.file.is_some() {
                    return Err(format!("Unexpected argument: {}", path));
                }
                options.file = Some(path.to_string());
            }
        }
    }

    match (&options.file, demo) {
        (Some(_), true) => Err("--demo does not take a file".to_string()),
        (None, false) => Err("No declaration file given".to_string()),
        _ => Ok(Command::Compile(options)),
    }
}

fn read_json(path: &str) -> Result<Json, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON in {}: {}", path, e))
}

#[derive(Debug, Serialize)]
struct Report {
    stylesheet: Vec<String>,
    elements: Vec<ElementReport>,
}

#[derive(Debug, Serialize)]
struct ElementReport {
    class_name: String,
    style: Map<String, Json>,
}

impl From<&RenderedStyle> for ElementReport {
    fn from(rendered: &RenderedStyle) -> Self {
        let style = rendered
            .values
            .iter()
            .map(|(name, value)| (name.to_string(), Json::String(value.to_string())))
            .collect();
        Self {
            class_name: rendered.class_name.clone(),
            style,
        }
    }
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let (source, input) = match &options.file {
        Some(path) => (read_json(path)?, Json::Object(Map::new())),
        None => (
            serde_json::from_str(DEMO_DECLARATIONS)?,
            serde_json::from_str(DEMO_INPUT)?,
        ),
    };
    let input = match &options.input {
        Some(path) => read_json(path)?,
        None => input,
    };

    let declarations = load_declarations(&source)?;

    let mut config = StyleConfig::default();
    if let Some(prefix) = &options.prefix {
        config.class_prefix = prefix.clone();
    }
    config.memoize = !options.no_memo;
    let mut styles = StyleDef::with_config(config)?;

    log::info!("Compiling {} declaration(s)", declarations.len());

    let mut rendered = Vec::with_capacity(declarations.len());
    for declaration in &declarations {
        rendered.push(styles.render(declaration, &input)?);
    }

    let stats = styles.cache_stats();
    log::info!(
        "{} rule(s) emitted, {} cache hit(s), {} class(es) allocated",
        styles.sheet().len(),
        stats.hits,
        styles.classes_allocated()
    );

    if options.json {
        let report = Report {
            stylesheet: styles.sheet().rules().to_vec(),
            elements: rendered.iter().map(ElementReport::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Stylesheet ===\n");
    println!("{}", styles.sheet().to_css());
    println!("\n=== Elements ===\n");
    for element in &rendered {
        println!("{}", element);
    }

    Ok(())
}

/// Demo declarations; the third repeats the first and reuses its class
const DEMO_DECLARATIONS: &str = r#"
[
    {
        "padding": "4px 8px",
        "color": { "$from": "theme", "cases": { "light": "black" }, "default": "white" },
        ":hover": { "text-decoration": "underline" },
        ".icon": {
            "width": { "$from": "icon.size", "format": "{}px" }
        }
    },
    {
        "margin": "0",
        "::after": { "content": "'>'" }
    },
    {
        "padding": "4px 8px",
        "color": { "$from": "theme", "cases": { "light": "black" }, "default": "white" },
        ":hover": { "text-decoration": "underline" },
        ".icon": {
            "width": { "$from": "icon.size", "format": "{}px" }
        }
    }
]
"#;

/// Demo input record
const DEMO_INPUT: &str = r#"{ "theme": "dark", "icon": { "size": 16 } }"#;
