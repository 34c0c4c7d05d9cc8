//! gsbundle: Build a single deployable Apps Script file from ordered modules.
//!
//! Usage:
//!   gsbundle [options]
//!
//! Runs one of: help, duplicate check, module verification, or a full build.

use clap::{CommandFactory, Parser as ClapParser};
use gsbundle_compiler::{BuildError, BuildReport, ModuleOutcome, Program};
use gsbundle_core::format_kb;
use gsbundle_diagnostics::Diagnostic;
use gsbundle_options::{BuildMode, BuildOptions};
use gsbundle_scanner::ScanResult;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser, Debug)]
#[command(
    name = "gsbundle",
    about = "Concatenate Apps Script modules into one consolidated file",
    disable_version_flag = true,
    disable_help_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Print usage.
    #[arg(short = 'h', long)]
    help: bool,

    /// Only check for duplicate declarations across all modules.
    #[arg(long = "check-duplicates")]
    check_duplicates: bool,

    /// Only verify that every listed module exists.
    #[arg(short = 'v', long)]
    verify: bool,

    /// Remove the previous output before building.
    #[arg(short = 'c', long)]
    clean: bool,

    /// Leave test modules out of the build.
    #[arg(short = 'p', long, visible_alias = "no-tests")]
    production: bool,

    /// Suppress progress output.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Directory holding the modules and the output file.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Path to a gsbundle.json manifest.
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Rewrite destructured callback parameters to ES5.
    #[arg(long)]
    downlevel: bool,
}

impl Cli {
    fn options(&self) -> BuildOptions {
        BuildOptions {
            include_tests: !self.production,
            quiet: self.quiet,
            clean: self.clean,
            downlevel: self.downlevel,
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    init_tracing();
    let cli = Cli::parse();
    process::exit(run(&cli));
}

/// Run the mode selected by `cli` and return the process exit code.
fn run(cli: &Cli) -> i32 {
    let mode = BuildMode::resolve(cli.help, cli.check_duplicates, cli.verify);
    if mode == BuildMode::Help {
        return match Cli::command().print_help() {
            Ok(()) => {
                println!();
                0
            }
            Err(e) => {
                print_error(&format!("failed to print usage: {}", e));
                1
            }
        };
    }

    let program = match Program::open(&cli.root, cli.manifest.as_deref()) {
        Ok(program) => program,
        Err(e) => {
            print_error(&e.to_string());
            return 1;
        }
    };

    match mode {
        BuildMode::CheckDuplicates => run_check(&program),
        BuildMode::Verify => run_verify(&program, &cli.options()),
        BuildMode::Build => run_build(&program, &cli.options()),
        BuildMode::Help => 0,
    }
}

/// Install a tracing subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

fn run_check(program: &Program) -> i32 {
    println!("Checking for duplicate declarations across all modules...\n");
    let scan = match program.check_duplicates() {
        Ok(scan) => scan,
        Err(e) => {
            print_error(&e.to_string());
            return 1;
        }
    };

    if scan.has_duplicates() {
        print_duplicates(&scan);
        return 1;
    }

    print_success("No duplicate declarations found!");
    println!();
    println!("Constant declarations (single source of truth):");
    for decl in scan.table.single_declarations() {
        println!("   {}: {}:{}", decl.symbol, decl.file, decl.line);
    }
    println!();
    0
}

fn run_verify(program: &Program, options: &BuildOptions) -> i32 {
    println!("Verifying modules...\n");
    let outcome = program.verify(options.include_tests);
    let report = &outcome.report;

    if !report.is_complete() {
        print_warning(&format!("Missing modules ({}):", report.missing.len()));
        for name in &report.missing {
            println!("   - {}", name);
        }
        println!("\n   These modules will be skipped in the build.\n");
    }
    print_success(&format!("Found {}/{} modules", report.found, report.total));

    if !outcome.unlisted.is_empty() {
        println!();
        for diag in outcome.unlisted.diagnostics() {
            print_diagnostic(diag);
        }
    }
    println!();
    0
}

fn run_build(program: &Program, options: &BuildOptions) -> i32 {
    let manifest = &program.manifest;
    if !options.quiet {
        println!("Building {} ({})...\n", manifest.title, options.build_type());
        println!("Validating module dependencies...");
    }

    let warnings = program.dependency_warnings();
    if !warnings.is_empty() {
        print_warning("Dependency warnings:");
        for warning in &warnings {
            println!("   {}", warning);
        }
        println!();
    } else if !options.quiet {
        println!("   All module dependencies are correctly ordered\n");
    }

    if !options.quiet {
        println!("Checking for duplicate declarations...");
    }

    match program.build(options) {
        Ok(report) => {
            print_build_report(&report, options);
            0
        }
        Err(BuildError::Duplicates(scan)) => {
            print_error("BUILD FAILED: duplicate declarations detected");
            print_duplicates(&scan);
            eprintln!("Keep each constant in only one module (config constants belong in Constants.gs).");
            1
        }
        Err(e) => {
            print_error(&format!("BUILD FAILED: {}", e));
            1
        }
    }
}

fn print_build_report(report: &BuildReport, options: &BuildOptions) {
    let total = report.modules.len();

    if !options.quiet {
        println!("   No duplicate declarations found\n");
        if report.cleaned {
            println!("Cleaned previous output\n");
        }
        for (index, module) in report.modules.iter().enumerate() {
            match module {
                ModuleOutcome::Included { name, bytes } => {
                    println!("[{}/{}] {} ({} KB)", index + 1, total, name, format_kb(*bytes, 1));
                }
                ModuleOutcome::Skipped { name } => {
                    print_warning(&format!("[{}/{}] SKIPPED: {} (file not found)", index + 1, total, name));
                }
            }
        }
        println!();
    }

    let skipped = report.skipped().count();
    for diag in trailing_diagnostics(report, options) {
        print_diagnostic(diag);
    }
    if options.quiet {
        println!("{}", report.output_path);
        return;
    }

    print_success("BUILD SUCCESSFUL");
    println!("   Output: {}", report.output_path);
    println!("   Size: {} KB", format_kb(report.output.len(), 2));
    println!("   Modules: {} included, {} skipped", report.included_count(), skipped);
    if report.output.rewrites > 0 {
        println!("   Downleveled: {} callbacks", report.output.rewrites);
    }
    println!("   Build date: {}", report.build_date);
    println!("   Build type: {}\n", report.build_type);
}

/// Diagnostics printed after the progress lines. A verbose build already
/// reports each missing unit as a `SKIPPED` progress line.
fn trailing_diagnostics<'a>(report: &'a BuildReport, options: &BuildOptions) -> &'a [Diagnostic] {
    if options.quiet {
        report.diagnostics.diagnostics()
    } else {
        &[]
    }
}

fn print_duplicates(scan: &ScanResult) {
    let use_color = atty_is_terminal();
    eprintln!("\nThe following constants are declared in multiple modules:\n");
    for dup in &scan.duplicates {
        if use_color {
            eprintln!("  {}{}{}:", BOLD, dup.symbol, RESET);
        } else {
            eprintln!("  {}:", dup.symbol);
        }
        for loc in &dup.locations {
            eprintln!("    - {}", loc);
        }
        eprintln!();
    }
}

fn print_diagnostic(diag: &Diagnostic) {
    if atty_is_terminal() {
        let color = if diag.is_error() { RED } else { YELLOW };
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}", CYAN, file, RESET);
            if let Some(line) = diag.line {
                eprint!(":{}", line);
            }
            eprint!(": ");
        }
        eprintln!(
            "{}{}{}{} {}GS{}{}: {}",
            BOLD, color, diag.category, RESET, GRAY, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn print_warning(msg: &str) {
    if atty_is_terminal() {
        println!("{}{}{}", YELLOW, msg, RESET);
    } else {
        println!("{}", msg);
    }
}

fn print_success(msg: &str) {
    if atty_is_terminal() {
        println!("{}{}{}{}", BOLD, GREEN, msg, RESET);
    } else {
        println!("{}", msg);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
