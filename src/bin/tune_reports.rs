use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use baseline_tune::artifact::Encoding;
use baseline_tune::catalog::ProfileCatalog;
use baseline_tune::config::GeneratorConfig;
use baseline_tune::engine::{EngineDescriptorBuilder, TuneRequest};
use baseline_tune::{Generation, TuneGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

enum Source {
    Input(PathBuf),
    Combo(String),
    Default,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let mut output_dir = PathBuf::from("reports");
    let mut source = Source::Default;
    let mut config_path: Option<PathBuf> = None;
    let mut encoding = match env::var("TUNE_FORMAT") {
        Ok(value) if value.eq_ignore_ascii_case("xml") => Encoding::XmlPages,
        _ => Encoding::Text,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                if let Some(value) = args.next() {
                    output_dir = PathBuf::from(value);
                }
            }
            "--input" => {
                if let Some(value) = args.next() {
                    source = Source::Input(PathBuf::from(value));
                }
            }
            "--combo" => {
                if let Some(value) = args.next() {
                    source = Source::Combo(value);
                }
            }
            "--config" => config_path = args.next().map(PathBuf::from),
            "--format" => match args.next().as_deref() {
                Some("xml") => encoding = Encoding::XmlPages,
                Some("text") => encoding = Encoding::Text,
                Some(other) => panic!("unknown format '{other}', expected text or xml"),
                None => {}
            },
            _ => {}
        }
    }

    let catalog = ProfileCatalog::shared();
    let config = match &config_path {
        Some(path) => GeneratorConfig::from_json(&read_file(path))
            .unwrap_or_else(|err| panic!("invalid config {}: {err}", path.display())),
        None => GeneratorConfig::default(),
    };
    let request = load_request(&source, catalog);

    let generation = TuneGenerator::new(catalog, &config)
        .build_artifact(&request, encoding)
        .unwrap_or_else(|err| panic!("failed to build tune: {err}"));

    fs::create_dir_all(&output_dir)
        .unwrap_or_else(|err| panic!("failed to create output directory {output_dir:?}: {err}"));

    let tune_path = output_dir.join(generation.artifact.file_name());
    write_file(&tune_path, &generation.artifact.content);
    write_file(
        &output_dir.join(format!("{}_NOTES.md", generation.artifact.filename)),
        &render_notes(&generation),
    );
    info!(path = %tune_path.display(), notices = generation.notices.len(), "wrote tune");
}

fn load_request(source: &Source, catalog: &ProfileCatalog) -> TuneRequest {
    match source {
        Source::Input(path) => TuneRequest::from_json(&read_file(path))
            .unwrap_or_else(|err| panic!("invalid request {}: {err}", path.display())),
        Source::Combo(name) => TuneRequest::from_combo(name, catalog).unwrap_or_else(|| {
            let known: Vec<&str> = catalog.combos().map(|(name, _)| name).collect();
            panic!("unknown combo '{name}', known: {}", known.join(", "))
        }),
        Source::Default => TuneRequest::new(EngineDescriptorBuilder::new().build()),
    }
}

fn render_notes(generation: &Generation) -> String {
    let parameters = &generation.parameters;
    let mut notices = String::new();
    for notice in &generation.notices {
        notices.push_str(&format!("- {notice}\n"));
    }
    if notices.is_empty() {
        notices.push_str("- none\n");
    }

    let mut findings = String::new();
    for warning in &generation.validation.warnings {
        findings.push_str(&format!("| warning | {warning} |\n"));
    }
    for suggestion in &generation.validation.suggestions {
        findings.push_str(&format!("| suggestion | {suggestion} |\n"));
    }

    format!(
        "# Baseline Tune Notes\n\
\n`{}` for {} {}ci, {} cylinders.\n\
\n| Parameter | Value |\n| --- | --- |\n\
| Required fuel (ms) | {} |\n\
| Injector deadtime (ms) | {} |\n\
| Hard / soft rev limit | {} / {} |\n\
| Dwell (ms) | {} |\n\
| Firing order | {} |\n\
\n## Recovered conditions\n\n{}\
\n## Findings\n\n| Kind | Detail |\n| --- | --- |\n{}\
\nThis is a baseline tune. Professional tuning is recommended before driving.\n",
        generation.artifact.file_name(),
        parameters.engine_family,
        parameters.displacement_ci,
        parameters.cylinders,
        parameters.required_fuel,
        parameters.injector.deadtime_ms,
        parameters.rev_limits.hard,
        parameters.rev_limits.soft,
        parameters.coil.dwell_time_ms,
        parameters
            .firing_order
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join("-"),
        notices,
        findings,
    )
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| {
        panic!("failed to read {}: {err}", path.display());
    })
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", path.display());
    });
}
