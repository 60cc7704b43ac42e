use std::sync::Arc;

use evidence::fields;
use hints::{parse_brand_list, parse_sf_boolean, parse_sf_string, primary_brand, BrandVersion};
use normalize::EvidenceSet;

use crate::dataset::Dataset;
use crate::engine::MatchEngine;
use crate::error::EngineError;
use crate::types::{RawMatch, RawValue};

/// Reference [`MatchEngine`] driven by a [`Dataset`].
///
/// Client hints are preferred; the `User-Agent` header is only consulted
/// for properties the hints cannot answer. Cloning shares the dataset.
#[derive(Debug, Clone)]
pub struct TableEngine {
    dataset: Arc<Dataset>,
}

impl TableEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_dataset_arc(Arc::new(dataset))
    }

    pub fn with_dataset_arc(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn builtin() -> Self {
        Self::new(Dataset::builtin())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn resolve(&self, evidence: &EvidenceSet, property: &str) -> Option<RawValue> {
        match property {
            "BrowserName" => self.browser(evidence).map(|(name, _)| RawValue::String(name)),
            "BrowserVersion" => self
                .browser(evidence)
                .and_then(|(_, version)| version)
                .map(RawValue::String),
            "PlatformName" => self.platform(evidence).map(RawValue::String),
            "PlatformVersion" => self.platform_version(evidence).map(RawValue::String),
            "PlatformArchitecture" => hint_string(evidence, fields::SEC_CH_UA_ARCH)
                .filter(|arch| !arch.is_empty())
                .map(RawValue::String),
            "IsMobile" => self.is_mobile(evidence).map(RawValue::Bool),
            "HardwareModel" => model(evidence).map(RawValue::String),
            "HardwareVendor" => model(evidence)
                .and_then(|m| self.dataset.hardware_for_model(&m))
                .map(|h| RawValue::String(h.vendor.clone())),
            "HardwareName" => model(evidence)
                .and_then(|m| self.dataset.hardware_for_model(&m))
                .map(|h| RawValue::List(vec![h.name.clone()])),
            _ => None,
        }
    }

    /// Browser name plus version, if known.
    fn browser(&self, evidence: &EvidenceSet) -> Option<(String, Option<String>)> {
        if let Some(brand) = client_hint_brand(evidence) {
            let name = self
                .dataset
                .browser_for_brand(&brand.brand)
                .map(str::to_string)
                .unwrap_or(brand.brand);
            let version = Some(brand.version).filter(|v| !v.is_empty());
            return Some((name, version));
        }

        let ua = evidence.get(fields::USER_AGENT)?;
        self.dataset.ua_browsers.iter().find_map(|token| {
            let idx = ua.find(token.token.as_str())?;
            let version = version_token(&ua[idx + token.token.len()..]);
            Some((token.name.clone(), version))
        })
    }

    fn platform(&self, evidence: &EvidenceSet) -> Option<String> {
        if let Some(platform) =
            hint_string(evidence, fields::SEC_CH_UA_PLATFORM).filter(|p| !p.is_empty())
        {
            return Some(platform);
        }
        self.ua_platform(evidence).map(|(name, _)| name)
    }

    fn platform_version(&self, evidence: &EvidenceSet) -> Option<String> {
        let platform = self.platform(evidence)?;
        if let Some(raw) =
            hint_string(evidence, fields::SEC_CH_UA_PLATFORM_VERSION).filter(|v| !v.is_empty())
        {
            return Some(self.dataset.marketing_platform_version(&platform, &raw));
        }
        let (ua_platform, raw) = self.ua_platform(evidence)?;
        let raw = raw?;
        Some(self.dataset.marketing_platform_version(&ua_platform, &raw))
    }

    fn ua_platform(&self, evidence: &EvidenceSet) -> Option<(String, Option<String>)> {
        let ua = evidence.get(fields::USER_AGENT)?;
        self.dataset.ua_platforms.iter().find_map(|token| {
            let idx = ua.find(token.token.as_str())?;
            let version = version_token(&ua[idx + token.token.len()..]);
            Some((token.name.clone(), version))
        })
    }

    fn is_mobile(&self, evidence: &EvidenceSet) -> Option<bool> {
        if let Some(flag) = evidence
            .get(fields::SEC_CH_UA_MOBILE)
            .and_then(parse_sf_boolean)
        {
            return Some(flag);
        }
        evidence
            .get(fields::USER_AGENT)
            .map(|ua| ua.contains("Mobile"))
    }
}

impl MatchEngine for TableEngine {
    fn match_evidence(
        &self,
        evidence: &EvidenceSet,
        properties: &[String],
    ) -> Result<RawMatch, EngineError> {
        Ok(properties
            .iter()
            .filter(|name| self.defines_property(name))
            .filter_map(|name| {
                self.resolve(evidence, name)
                    .map(|value| (name.clone(), value))
            })
            .collect())
    }

    fn defines_property(&self, property: &str) -> bool {
        self.dataset.property(property).is_some()
    }
}

/// Primary brand from the full version list, falling back to `sec-ch-ua`.
fn client_hint_brand(evidence: &EvidenceSet) -> Option<BrandVersion> {
    [fields::SEC_CH_UA_FULL_VERSION_LIST, fields::SEC_CH_UA]
        .into_iter()
        .filter_map(|field| evidence.get(field))
        .find_map(|raw| primary_brand(&parse_brand_list(raw)).cloned())
}

fn hint_string(evidence: &EvidenceSet, field: &str) -> Option<String> {
    evidence.get(field).map(parse_sf_string)
}

fn model(evidence: &EvidenceSet) -> Option<String> {
    hint_string(evidence, fields::SEC_CH_UA_MODEL).filter(|m| !m.is_empty())
}

/// Leading version token of `rest`, e.g. `129.0.0.0` from
/// `129.0.0.0 Safari/537.36` or `10_15_7` from `10_15_7) AppleWebKit`.
fn version_token(rest: &str) -> Option<String> {
    let token: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '_')
        .collect();
    Some(token).filter(|t| !t.is_empty())
}
