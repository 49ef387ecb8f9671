use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;
use storytag_config::{Config, GeneratorKind};
use storytag_engine::{ProjectScan, ScanReport, Session, apply_descriptions, io};
use storytag_generate::{
    BatchSettings, PlaceholderGenerator, RemoteGenerator, TestGenerator, generate_batch,
    write_test_file,
};

const JEST_CONFIG_FILE: &str = "jest.config.js";

const EXIT_OK: u8 = 0;
/// Exit status for a scan that found structural errors or no stories
const EXIT_SCAN_ERRORS: u8 = 1;
/// Exit status for a document without its project tag
const EXIT_MISSING_PROJECT: u8 = 2;

fn session_for(root: &Path, config: &Config) -> Session {
    Session::new(root)
        .with_tests_dir(&config.tests_dir)
        .with_test_suffix(config.test_suffix.as_str())
        .with_project_tag_required(config.require_project_tag)
}

/// Boilerplate jest config matching the files `generate` writes for this
/// session. Test folders outside the workspace keep their absolute path.
fn jest_config(session: &Session) -> String {
    let tests_dir = match session.tests_dir().strip_prefix(session.workspace_root()) {
        Ok(inside) if inside.as_os_str().is_empty() => "<rootDir>".to_string(),
        Ok(inside) => format!("<rootDir>/{}", inside.to_string_lossy().replace('\\', "/")),
        Err(_) => session.tests_dir().to_string_lossy().replace('\\', "/"),
    };
    format!(
        "/** @type {{import('jest').Config}} */\n\
         module.exports = {{\n  \
           testMatch: ['{tests_dir}/**/*{suffix}'],\n\
         }};\n",
        suffix = session.test_suffix(),
    )
}

fn scan_file(session: &mut Session, config: &Config, file: &Path) -> Result<ProjectScan> {
    let path = session.resolve(file);
    let text = io::read_document(&path)?;
    let mut scan = session.scan(&text);
    apply_descriptions(&mut scan.stories, &config.descriptions);
    log::info!("Scanned {}: {} stories", path.display(), scan.stories.len());
    Ok(scan)
}

/// Decide whether the scan can be used, printing one summary line and the
/// detailed report to stderr when it cannot.
fn check_scan(scan: &ProjectScan) -> Option<u8> {
    if scan.report == ScanReport::MissingProjectTag {
        eprintln!("{}", scan.report);
        return Some(EXIT_MISSING_PROJECT);
    }

    if scan.stories.is_empty() {
        eprintln!("No tags found in current file");
        if !scan.report.is_clean() {
            eprint!("{}", scan.report);
        }
        return Some(EXIT_SCAN_ERRORS);
    }

    if !scan.report.is_clean() {
        eprintln!("There are errors in the file, see the report below");
        eprint!("{}", scan.report);
        return Some(EXIT_SCAN_ERRORS);
    }

    None
}

pub fn scan(root: &Path, file: &Path, json: bool) -> Result<u8> {
    let config = Config::load(root)?;
    let mut session = session_for(root, &config);
    let scan = scan_file(&mut session, &config, file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(match scan.report {
            ScanReport::Clean => EXIT_OK,
            ScanReport::MissingProjectTag => EXIT_MISSING_PROJECT,
            ScanReport::Diagnostics(_) => EXIT_SCAN_ERRORS,
        });
    }

    if let Some(code) = check_scan(&scan) {
        return Ok(code);
    }

    if let Some(project) = &scan.project {
        println!("Project: {project}");
    }
    for story in &scan.stories {
        if story.has_content() {
            println!("Tag: {}, Content: {}", story.id(), story.content().trim_end());
        } else {
            println!("Tag: {}, Content: (none)", story.id());
        }
        if !story.description().is_empty() {
            println!("  Description: {}", story.description());
        }
    }
    println!("{}", scan.report);
    Ok(EXIT_OK)
}

fn build_generator(config: &Config, session: &Session) -> Result<Arc<dyn TestGenerator>> {
    match config.generator.kind {
        GeneratorKind::Placeholder => Ok(Arc::new(PlaceholderGenerator)),
        GeneratorKind::Remote => {
            let Some(endpoint) = config.generator.endpoint.as_deref() else {
                bail!("generator.endpoint must be set when generator.kind = \"remote\"");
            };
            let generator = RemoteGenerator::with_timeout(
                endpoint,
                Duration::from_secs(config.generator.timeout_secs),
            )?
            .with_api_key(config.api_key())
            .with_project(session.project().map(ToString::to_string));
            log::info!("Generating test bodies with {}", generator.endpoint());
            Ok(Arc::new(generator))
        }
    }
}

pub async fn generate(root: &Path, file: &Path) -> Result<u8> {
    let config = Config::load(root)?;
    let mut session = session_for(root, &config);
    let scan = scan_file(&mut session, &config, file)?;

    if let Some(code) = check_scan(&scan) {
        return Ok(code);
    }

    let generator = build_generator(&config, &session)?;
    let settings = BatchSettings {
        timeout: Duration::from_secs(config.generator.timeout_secs),
        max_concurrent: config.generator.max_concurrent,
    };
    let report = generate_batch(generator, &scan.stories, settings).await;

    let test_file = session.test_file_for(file)?;
    let summary = write_test_file(&test_file, &report)
        .with_context(|| format!("writing {}", test_file.display()))?;

    println!(
        "Wrote {} test stubs to {}",
        summary.written,
        test_file.display()
    );
    if !report.is_success() {
        println!("{} user stories could not be generated", summary.skipped);
    }
    Ok(EXIT_OK)
}

pub fn run(root: &Path) -> Result<u8> {
    let config = Config::load(root)?;
    let runner = &config.runner;
    log::info!("Running {} {}", runner.command, runner.args.join(" "));

    let status = Command::new(&runner.command)
        .args(&runner.args)
        .current_dir(root)
        .status()
        .with_context(|| format!("starting test runner `{}`", runner.command))?;

    // No code means the runner was killed by a signal
    Ok(status.code().map_or(1, |code| u8::try_from(code).unwrap_or(1)))
}

pub fn init(root: &Path) -> Result<u8> {
    let config = Config::load(root)?;
    let session = session_for(root, &config);
    let config_path = Config::config_path(session.workspace_root());

    let wrote_config = io::write_if_absent(&config_path, &Config::default().to_toml()?)?;
    report_init(&config_path, wrote_config);

    let jest_path = session.workspace_root().join(JEST_CONFIG_FILE);
    let wrote_jest = io::write_if_absent(&jest_path, &jest_config(&session))?;
    report_init(&jest_path, wrote_jest);

    io::ensure_folder(session.tests_dir())?;
    Ok(EXIT_OK)
}

fn report_init(path: &Path, written: bool) {
    if written {
        println!("Created {}", path.display());
    } else {
        println!("Kept existing {}", path.display());
    }
}
