//! Snippet emission and suppression through the full pipeline.

use uadetect::{
    collect, Detector, EvidenceConfig, NoValueReason, Pipeline, RawEvidence, UadetectConfig,
    DEFAULT_SNIPPET_PROPERTY,
};

const MAC_CHROME_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

/// High entropy values for Chrome 129 on macOS 14.3, as posted back by the
/// snippet.
const GHEV_CHROME_129: &str = concat!(
    "eyJicmFuZHMiOlt7ImJyYW5kIjoiR29vZ2xlIENocm9tZSIsInZlcnNpb24iOiIxMjkifSx7ImJyYW5kIjoiTm90",
    "PUE/QnJhbmQiLCJ2ZXJzaW9uIjoiOCJ9LHsiYnJhbmQiOiJDaHJvbWl1bSIsInZlcnNpb24iOiIxMjkifV0sImZ1",
    "bGxWZXJzaW9uTGlzdCI6W3siYnJhbmQiOiJHb29nbGUgQ2hyb21lIiwidmVyc2lvbiI6IjEyOS4wLjY2NjguMTAz",
    "In0seyJicmFuZCI6Ik5vdD1BP0JyYW5kIiwidmVyc2lvbiI6IjguMC4wLjAifSx7ImJyYW5kIjoiQ2hyb21pdW0i",
    "LCJ2ZXJzaW9uIjoiMTI5LjAuNjY2OC4xMDMifV0sIm1vYmlsZSI6ZmFsc2UsIm1vZGVsIjoiIiwicGxhdGZvcm0i",
    "OiJtYWNPUyIsInBsYXRmb3JtVmVyc2lvbiI6IjE0LjMuMCJ9",
);

fn full_header_evidence() -> Vec<(&'static str, &'static str)> {
    vec![
        ("header.user-agent", MAC_CHROME_UA),
        (
            "header.sec-ch-ua",
            r#""Google Chrome";v="129", "Not=A?Brand";v="8", "Chromium";v="129""#,
        ),
        ("header.sec-ch-ua-mobile", "?0"),
        ("header.sec-ch-ua-platform", r#""macOS""#),
        ("header.sec-ch-ua-platform-version", r#""14.3.0""#),
        ("header.sec-ch-ua-model", r#""""#),
        (
            "header.sec-ch-ua-full-version-list",
            r#""Google Chrome";v="129.0.6668.103", "Not=A?Brand";v="8.0.0.0", "Chromium";v="129.0.6668.103""#,
        ),
    ]
}

fn pipeline() -> Pipeline {
    Pipeline::from_config(&UadetectConfig::default()).expect("default pipeline")
}

fn snippet(pairs: Vec<(&str, &str)>) -> String {
    pipeline()
        .process(pairs)
        .expect("pipeline should succeed")
        .value_as_string(DEFAULT_SNIPPET_PROPERTY)
        .expect("snippet property is requested")
}

#[test]
fn snippet_present_when_any_hint_is_missing() {
    let full = full_header_evidence();
    for (skipped, _) in full.iter().filter(|(key, _)| *key != "header.user-agent") {
        let evidence: Vec<_> = full
            .iter()
            .filter(|(key, _)| key != skipped)
            .copied()
            .collect();
        assert_ne!(snippet(evidence), "", "missing {skipped} should emit the snippet");
    }
}

#[test]
fn snippet_suppressed_due_to_headers() {
    let results = pipeline()
        .process(full_header_evidence())
        .expect("pipeline should succeed");
    assert_eq!(results.value_as_string(DEFAULT_SNIPPET_PROPERTY).unwrap(), "");
    assert_eq!(
        results.no_value_reason(DEFAULT_SNIPPET_PROPERTY).unwrap(),
        Some(&NoValueReason::Suppressed)
    );
    assert!(!results.snippet_decision().emit);
}

#[test]
fn user_agent_absence_alone_does_not_emit() {
    let evidence: Vec<_> = full_header_evidence()
        .into_iter()
        .filter(|(key, _)| *key != "header.user-agent")
        .collect();
    assert_eq!(snippet(evidence), "");
}

fn suppressed_by_ghev_on(channel: &str) {
    let key = format!("{channel}.51D_gethighentropyvalues");
    let evidence = vec![("header.user-agent", MAC_CHROME_UA), (key.as_str(), GHEV_CHROME_129)];
    assert_eq!(snippet(evidence), "", "GHEV via {channel} should suppress");
}

#[test]
fn snippet_suppressed_due_to_query() {
    suppressed_by_ghev_on("query");
}

#[test]
fn snippet_suppressed_due_to_cookie() {
    suppressed_by_ghev_on("cookie");
}

#[test]
fn malformed_ghev_does_not_suppress() {
    let evidence = vec![
        ("header.user-agent", MAC_CHROME_UA),
        ("cookie.51D_GetHighEntropyValues", "%%%not-base64%%%"),
    ];
    assert_ne!(snippet(evidence), "");
}

#[test]
fn ghev_query_and_cookie_decisions_match_headers() {
    let detector: Detector = pipeline().detector().clone();
    let headers = collect(full_header_evidence(), &EvidenceConfig::default());
    let from_headers = detector.process(&headers).expect("process");

    for channel in ["query", "cookie"] {
        let raw: RawEvidence = collect(
            [
                ("header.user-agent".to_string(), MAC_CHROME_UA),
                (format!("{channel}.51d_gethighentropyvalues"), GHEV_CHROME_129),
            ],
            &EvidenceConfig::default(),
        );
        let results = detector.process(&raw).expect("process");
        assert_eq!(results.snippet_decision(), from_headers.snippet_decision());
        assert_eq!(
            results.value_as_string("BrowserName").unwrap(),
            from_headers.value_as_string("BrowserName").unwrap()
        );
    }
}
