mod _fixtures;

use std::collections::BTreeMap;

use _fixtures::{catalog, combo, flat_set, DEFAULT_REQUEST, FROZEN_NOW};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use baseline_tune::artifact::{ArtifactSerializer, Encoding};
use baseline_tune::config::{GeneratorConfig, MSQ_NAMESPACE};
use baseline_tune::notice::Notice;
use baseline_tune::pages::{PageBuffer, PageSet, PAGE_SIZE};
use baseline_tune::{build_artifact_at, derive_parameters, TuneGenerator};
use xml::reader::{EventReader, XmlEvent};

#[derive(Debug, Default)]
struct ParsedMsq {
    root_namespace: Option<String>,
    bibliography: BTreeMap<String, String>,
    version_info: BTreeMap<String, String>,
    pages: Vec<(BTreeMap<String, String>, Vec<u8>)>,
}

fn parse(document: &str) -> ParsedMsq {
    let mut parsed = ParsedMsq::default();
    let mut in_data = false;
    for event in EventReader::from_str(document) {
        match event.expect("well-formed XML") {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let attributes: BTreeMap<String, String> = attributes
                    .into_iter()
                    .map(|attribute| (attribute.name.local_name, attribute.value))
                    .collect();
                match name.local_name.as_str() {
                    "msq" => parsed.root_namespace = name.namespace,
                    "bibliography" => parsed.bibliography = attributes,
                    "versionInfo" => parsed.version_info = attributes,
                    "page" => parsed.pages.push((attributes, Vec::new())),
                    "data" => in_data = true,
                    _ => {}
                }
            }
            XmlEvent::Characters(text) if in_data => {
                let (_, bytes) = parsed.pages.last_mut().expect("data inside page");
                *bytes = STANDARD.decode(text.trim()).expect("base64 payload");
            }
            XmlEvent::EndElement { name } if name.local_name == "data" => in_data = false,
            _ => {}
        }
    }
    parsed
}

#[test]
fn document_carries_headers_and_sixteen_pages() {
    let generation =
        build_artifact_at(&DEFAULT_REQUEST, Encoding::XmlPages, *FROZEN_NOW).expect("xml");
    let content = &generation.artifact.content;
    assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

    let parsed = parse(content);
    assert_eq!(parsed.root_namespace.as_deref(), Some(MSQ_NAMESPACE));
    assert_eq!(parsed.bibliography["author"], "MS2/Extra Tune Generator");
    assert_eq!(parsed.bibliography["tuneComment"], "Generated Baseline Tune");
    assert_eq!(parsed.bibliography["writeDate"], "2024-06-09T12:30:00Z");
    assert_eq!(parsed.version_info["signature"], "MS2Extra comms342hP");
    assert_eq!(parsed.version_info["revision"], "20240609");
    assert_eq!(parsed.version_info["fileFormat"], "5.0");

    assert_eq!(parsed.pages.len(), 16);
    for (index, (attributes, bytes)) in parsed.pages.iter().enumerate() {
        assert_eq!(attributes["number"], (index + 1).to_string());
        assert_eq!(attributes["size"], "2048");
        assert_eq!(bytes.len(), PAGE_SIZE);
    }
}

#[test]
fn page_payloads_hold_encoded_tables() {
    let generation =
        build_artifact_at(&DEFAULT_REQUEST, Encoding::XmlPages, *FROZEN_NOW).expect("xml");
    let parsed = parse(&generation.artifact.content);
    // Zero-based index 9 is written as page number 10.
    let (_, afr) = &parsed.pages[9];
    let expected: Vec<u8> = generation
        .tables
        .afr
        .row_major()
        .map(|afr| (afr * 10.0).round() as u8)
        .collect();
    assert_eq!(&afr[..256], expected.as_slice());
    assert!(parsed.pages[0].1.iter().all(|&byte| byte == 0));
}

#[test]
fn caller_pages_are_normalized() {
    let config = GeneratorConfig::default();
    let params = derive_parameters(&DEFAULT_REQUEST);
    let mut buffers = vec![PageBuffer::zeroed(); 16];
    buffers[4] = PageBuffer::from_bytes(vec![0xAA; 12]);
    buffers[5] = PageBuffer::from_bytes(vec![0x11; PAGE_SIZE]);
    let pages = PageSet::from_buffers(buffers);

    let artifact = ArtifactSerializer::new(&config)
        .serialize(
            &params,
            &flat_set(60.0, 14.7, 28.0),
            Some(&pages),
            Encoding::XmlPages,
            *FROZEN_NOW,
        )
        .expect("xml");
    let parsed = parse(&artifact.content);
    assert_eq!(parsed.pages[4].1, vec![0; PAGE_SIZE]);
    assert_eq!(parsed.pages[5].1, vec![0x11; PAGE_SIZE]);
    // Raw pages are used as given; tables are not composed over them.
    assert!(parsed.pages[3].1.iter().all(|&byte| byte == 0));
}

#[test]
fn tables_are_written_over_caller_pages() {
    let mut buffers = vec![PageBuffer::zeroed(); 16];
    let mut calibrated = vec![0u8; PAGE_SIZE];
    calibrated[512] = 7;
    buffers[9] = PageBuffer::from_bytes(calibrated);
    buffers[12] = PageBuffer::from_bytes(Vec::new());

    let config = GeneratorConfig::default();
    let generation = TuneGenerator::new(catalog(), &config)
        .build_artifact_over_pages_at(
            &combo("Ford_302_X303_34lb"),
            PageSet::from_buffers(buffers),
            *FROZEN_NOW,
        )
        .expect("xml");
    assert_eq!(
        generation.notices,
        [Notice::BufferLengthViolation { page: 12, length: 0 }]
    );
    let parsed = parse(&generation.artifact.content);
    let (_, afr) = &parsed.pages[9];
    assert_eq!(afr[512], 7);
    assert_ne!(afr[0], 0);
}

#[test]
fn frozen_clock_documents_are_identical() {
    let request = combo("Ford_302_X303_34lb");
    let first = build_artifact_at(&request, Encoding::XmlPages, *FROZEN_NOW).expect("first");
    let second = build_artifact_at(&request, Encoding::XmlPages, *FROZEN_NOW).expect("second");
    assert_eq!(first.artifact, second.artifact);
    assert_eq!(first.artifact.filename, "2024-06-09_Ford_302_306ci_baseline");
}

#[test]
fn config_overrides_version_info() {
    let config = GeneratorConfig::default()
        .with_firmware("MS2Extra comms360", "20250101")
        .with_comment("Dyno day base map");
    let generation = TuneGenerator::new(catalog(), &config)
        .build_artifact_at(&DEFAULT_REQUEST, Encoding::XmlPages, *FROZEN_NOW)
        .expect("xml");
    let parsed = parse(&generation.artifact.content);
    assert_eq!(parsed.version_info["signature"], "MS2Extra comms360");
    assert_eq!(parsed.version_info["revision"], "20250101");
    assert_eq!(parsed.bibliography["tuneComment"], "Dyno day base map");
}
