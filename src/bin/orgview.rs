//! Command-line interface for orgview
//! Renders a parsed org document (the parser's JSON output) to HTML, to the output element tree
//! as JSON, or to the table of contents.
//!
//! Usage:
//!   orgview `<input.json>` [--format `<format>`] [--config `<file.toml>`] [--anchor-prefix `<prefix>`]
//!   orgview --list-formats

use std::fs;

use clap::{Arg, ArgAction, ArgMatches, Command};
use orgview::{render_document, Document, FormatRegistry, RenderConfig, Result, SettingsLoader};

fn main() {
    env_logger::init();

    let matches = Command::new("orgview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render parsed org documents to HTML, element trees or a table of contents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the parsed document (JSON)")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (html, json, toc)")
                .default_value("html"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Settings file layered over the defaults"),
        )
        .arg(
            Arg::new("anchor-prefix")
                .long("anchor-prefix")
                .help("Prefix applied to every table of contents index"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let registry = FormatRegistry::default();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match handle_render_command(&matches, &registry) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, registry: &FormatRegistry) -> Result<String> {
    let Some(path) = matches.get_one::<String>("path") else {
        return Ok(String::new());
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("html");

    let mut loader = SettingsLoader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if let Some(prefix) = matches.get_one::<String>("anchor-prefix") {
        loader = loader.set_override("anchors.prefix", prefix.as_str())?;
    }
    let settings = loader.build()?;
    log::debug!("settings: {settings:?}");

    let source = fs::read_to_string(path)?;
    let document = Document::from_json(&source)?;
    let rendered = render_document(&document, &RenderConfig::with_settings(settings))?;
    registry.serialize(&rendered, format)
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|format| format.description())
            .unwrap_or_default();
        println!("  {name:<8} {description}");
    }
}
