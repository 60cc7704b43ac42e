//! High Entropy Values and Structured User-Agent evidence, end to end.

use uadetect::{
    collect, decode_high_entropy_values, encode_high_entropy_values, normalize, primary_brand,
    BrandVersion, Channel, EvidenceConfig, NoValueReason, NormalizeConfig, Pipeline,
    RichPayload, UadetectConfig,
};

/// Chrome 126 on macOS 14.5:
/// `{"brands":[{"brand":"Not/A)Brand","version":"8"},{"brand":"Chromium","version":"126"},
/// {"brand":"Google Chrome","version":"126"}],"fullVersionList":[...],"mobile":false,
/// "model":"","platform":"macOS","platformVersion":"14.5.0"}`
const GHEV_MACOS: &str = concat!(
    "eyJicmFuZHMiOlt7ImJyYW5kIjoiTm90L0EpQnJhbmQiLCJ2ZXJzaW9uIjoiOCJ9LHsiYnJh",
    "bmQiOiJDaHJvbWl1bSIsInZlcnNpb24iOiIxMjYifSx7ImJyYW5kIjoiR29vZ2xlIENocm9t",
    "ZSIsInZlcnNpb24iOiIxMjYifV0sImZ1bGxWZXJzaW9uTGlzdCI6W3siYnJhbmQiOiJOb3Qv",
    "QSlCcmFuZCIsInZlcnNpb24iOiI4LjAuMC4wIn0seyJicmFuZCI6IkNocm9taXVtIiwidmVy",
    "c2lvbiI6IjEyNi4wLjY0NzguMTI3In0seyJicmFuZCI6Ikdvb2dsZSBDaHJvbWUiLCJ2ZXJz",
    "aW9uIjoiMTI2LjAuNjQ3OC4xMjcifV0sIm1vYmlsZSI6ZmFsc2UsIm1vZGVsIjoiIiwicGxh",
    "dGZvcm0iOiJtYWNPUyIsInBsYXRmb3JtVmVyc2lvbiI6IjE0LjUuMCJ9",
);

const SUA_WINDOWS: &str = r#"{"browsers":[{"brand":"Chromium","version":["124","0","6367","91"]},{"brand":"Google Chrome","version":["124","0","6367","91"]},{"brand":"Not-A.Brand","version":["99","0","0","0"]}],"platform":{"brand":"Windows","version":["14","0","0"]},"mobile":0,"architecture":"x86","source":2}"#;

fn pipeline() -> Pipeline {
    Pipeline::from_config(&UadetectConfig::default()).expect("default pipeline")
}

#[test]
fn special_evidence_ghev() {
    let results = pipeline()
        .process([("query.51D_gethighentropyvalues", GHEV_MACOS)])
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string("BrowserName").unwrap(), "Chrome");
    assert_eq!(results.value_as_string("BrowserVersion").unwrap(), "126.0.6478.127");
    assert_eq!(results.value_as_string("PlatformName").unwrap(), "macOS");
    assert_eq!(results.value_as_string("PlatformVersion").unwrap(), "14.5");
    // Empty model: present for the snippet rule, but no hardware match.
    assert_eq!(
        results.no_value_reason("HardwareModel").unwrap(),
        Some(&NoValueReason::Unmatched)
    );
}

#[test]
fn special_evidence_sua() {
    let results = pipeline()
        .process([("query.51D_structureduseragent", SUA_WINDOWS)])
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string("BrowserName").unwrap(), "Chrome");
    assert_eq!(results.value_as_string("BrowserVersion").unwrap(), "124.0.6367.91");
    assert_eq!(results.value_as_string("PlatformName").unwrap(), "Windows");
    assert_eq!(results.value_as_string("PlatformVersion").unwrap(), "11.0");
}

#[test]
fn payload_precedence_follows_delivering_channel() {
    // A header loses to a query-borne payload.
    let results = pipeline()
        .process([
            ("header.sec-ch-ua-platform", r#""Linux""#),
            ("query.51d_gethighentropyvalues", GHEV_MACOS),
        ])
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string("PlatformName").unwrap(), "macOS");

    // A query literal beats a query-borne payload.
    let raw = collect(
        [
            ("query.sec-ch-ua-platform", r#""Linux""#),
            ("query.51d_gethighentropyvalues", GHEV_MACOS),
        ],
        &EvidenceConfig::default(),
    );
    let evidence = normalize(&raw, &NormalizeConfig::default()).expect("normalize");
    assert_eq!(evidence.get("sec-ch-ua-platform"), Some(r#""Linux""#));
    assert_eq!(
        evidence.source("sec-ch-ua-platform").map(|s| s.channel),
        Some(Channel::Query)
    );
}

#[test]
fn malformed_payloads_synthesize_nothing() {
    let raw = collect(
        [
            ("query.51d_gethighentropyvalues", "!!!not base64!!!"),
            ("cookie.51d_gethighentropyvalues", "eyJicmFuZHMiOg"),
            ("query.51d_structureduseragent", "{\"browsers\": ["),
        ],
        &EvidenceConfig::default(),
    );
    let evidence = normalize(&raw, &NormalizeConfig::default()).expect("normalize");
    assert!(evidence.is_empty());
    assert!(!evidence.presence().is_complete());

    let results = pipeline()
        .process(raw.iter().map(|e| (e.key.to_string(), e.value.clone())))
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string("BrowserName").unwrap(), "");
    assert_ne!(
        results
            .value_as_string(uadetect::DEFAULT_SNIPPET_PROPERTY)
            .unwrap(),
        ""
    );
}

#[test]
fn ghev_round_trip_preserves_order() {
    let decoded = decode_high_entropy_values(GHEV_MACOS);
    let brands: Vec<&str> = decoded
        .brands
        .iter()
        .flatten()
        .map(|b| b.brand.as_str())
        .collect();
    assert_eq!(brands, ["Not/A)Brand", "Chromium", "Google Chrome"]);

    let again = decode_high_entropy_values(&encode_high_entropy_values(&decoded));
    assert_eq!(again, decoded);

    let list = decoded.full_version_list.as_deref().unwrap_or_default();
    assert_eq!(
        primary_brand(list),
        Some(&BrandVersion::new("Google Chrome", "126.0.6478.127"))
    );
}

#[test]
fn encoded_payload_feeds_detection() {
    let payload = RichPayload {
        brands: Some(vec![
            BrandVersion::new("Microsoft Edge", "125"),
            BrandVersion::new("Chromium", "125"),
            BrandVersion::new("Not.A/Brand", "24"),
        ]),
        mobile: Some(true),
        model: Some("Pixel 8".into()),
        platform: Some("Android".into()),
        platform_version: Some("14.0.0".into()),
        ..Default::default()
    };
    let encoded = encode_high_entropy_values(&payload);
    let results = pipeline()
        .process([("cookie.51d_gethighentropyvalues", encoded.as_str())])
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string("BrowserName").unwrap(), "Edge");
    assert_eq!(results.value_as_string("PlatformVersion").unwrap(), "14.0");
    assert_eq!(results.value_as_string("HardwareVendor").unwrap(), "Google");
    assert_eq!(
        results.value_as_list("HardwareName").unwrap(),
        Some(vec!["Pixel 8".to_string()])
    );
}
