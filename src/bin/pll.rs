//! Command-line interface for pll
//! This binary parses pll files into different formats and runs turtle programs.
//!
//! Usage:
//!   pll parse `<path>` [--format `<format>`] [--root `<label>`] [--tags] [--options]
//!                                                                  - Parse and serialize a pll file
//!   pll compile `<path>` [--format code|json]                        - Compile a turtle program
//!   pll bounds `<path>` [--decimals `<n>`]                             - Bounding box of a turtle program
//!   pll list-formats                                               - List all available formats
//!
//! `--config <file.toml>` layers a configuration file over the built-in defaults.
//! Set `RUST_LOG=trace` to see parser decisions.

use clap::{Arg, ArgAction, ArgMatches, Command};
use pll::pll::config::{Loader, PllConfig};
use pll::pll::formats::FormatRegistry;
use pll::pll::ast::NodeId;
use pll::pll::parsing::{parse_with, ParseError, ParseResult};
use pll::pll::turtle::{compile_tree, CompileError, MockTurtle, Program};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("pll")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing pll files and compiling turtle programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a pll file and print the tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value("pll"),
                )
                .arg(
                    Arg::new("root")
                        .long("root")
                        .help("Wrap the input under a synthetic root with this label"),
                )
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .action(ArgAction::SetTrue)
                        .help("Print each marked subtree instead of the whole tree"),
                )
                .arg(
                    Arg::new("options")
                        .long("options")
                        .action(ArgAction::SetTrue)
                        .help("Print key = value options of the root (of each marked node with --tags)"),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a turtle program")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["code", "json"])
                        .default_value("code"),
                ),
        )
        .subcommand(
            Command::new("bounds")
                .about("Run a turtle program on the mock turtle and print its bounding box")
                .arg(path_arg())
                .arg(
                    Arg::new("decimals")
                        .long("decimals")
                        .short('d')
                        .value_parser(clap::value_parser!(u32))
                        .default_value("2"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub, &config),
        Some(("compile", sub)) => handle_compile_command(sub, &config),
        Some(("bounds", sub)) => handle_bounds_command(sub, &config),
        Some(("list-formats", _)) => handle_list_formats_command(&config),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the pll file")
        .required(true)
        .index(1)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> PllConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("Configuration error: {e}")))
}

fn read_source(matches: &ArgMatches) -> String {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("Error reading file: {e}")))
}

fn report_parse_error(error: &ParseError, source: &str) -> ! {
    fail(error.with_context(source))
}

fn report_compile_error(error: &CompileError) -> ! {
    fail(format!("Compile error: {error}"))
}

fn compile_source(source: &str, config: &PllConfig) -> Program {
    let result =
        parse_with(source, &config.parser).unwrap_or_else(|e| report_parse_error(&e, source));
    compile_tree(result.tree()).unwrap_or_else(|e| report_compile_error(&e))
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &PllConfig) {
    let source = read_source(matches);
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let mut parser_config = config.parser.clone();
    if let Some(root) = matches.get_one::<String>("root") {
        parser_config = parser_config.with_root(root.as_str());
        if let Err(e) = parser_config.validate() {
            fail(format!("Configuration error: {e}"));
        }
    }

    let result =
        parse_with(&source, &parser_config).unwrap_or_else(|e| report_parse_error(&e, &source));
    let registry = FormatRegistry::with_config(config);
    let show_options = matches.get_flag("options");

    if matches.get_flag("tags") {
        for (name, node) in result.tags() {
            if show_options {
                println!("== {name}");
                print_options(&result, node.id());
                continue;
            }
            let subtree = result.tree().subtree(node.id());
            let output = registry
                .serialize(&subtree, format)
                .unwrap_or_else(|e| fail(format!("Format error: {e}")));
            println!("== {name}");
            print!("{output}");
        }
        return;
    }

    if show_options {
        print_options(&result, result.root_id());
        return;
    }

    let output = registry
        .serialize(result.tree(), format)
        .unwrap_or_else(|e| fail(format!("Format error: {e}")));
    print!("{output}");
}

fn print_options(result: &ParseResult, id: NodeId) {
    for (key, value) in result.options(id) {
        println!("{key} = {value}");
    }
}

/// Handle the compile command
fn handle_compile_command(matches: &ArgMatches, config: &PllConfig) {
    let source = read_source(matches);
    let program = compile_source(&source, config);

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let json = serde_json::to_string_pretty(&program)
                .unwrap_or_else(|e| fail(format!("Format error: {e}")));
            println!("{json}");
        }
        _ => print!("{}", program.render_text(&config.render.indent_string)),
    }
}

/// Handle the bounds command
fn handle_bounds_command(matches: &ArgMatches, config: &PllConfig) {
    let source = read_source(matches);
    let decimals = *matches
        .get_one::<u32>("decimals")
        .expect("decimals has a default");
    let program = compile_source(&source, config);
    let mut mock = MockTurtle::new();
    program.run(&mut mock);
    println!("{}", mock.bounds(decimals));
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &PllConfig) {
    let registry = FormatRegistry::with_config(config);
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {name}");
        println!("    {description}");
    }
}
