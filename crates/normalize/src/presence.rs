//! Which snippet-relevant client hints a request ended up with.

use std::fmt;

use evidence::fields;
use serde::{Deserialize, Serialize};

/// The six client-hint fields the snippet policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintField {
    Brands,
    Mobile,
    Platform,
    PlatformVersion,
    Model,
    FullVersionList,
}

impl HintField {
    pub const ALL: [HintField; 6] = [
        HintField::Brands,
        HintField::Mobile,
        HintField::Platform,
        HintField::PlatformVersion,
        HintField::Model,
        HintField::FullVersionList,
    ];

    /// Evidence field name, e.g. `sec-ch-ua-platform`.
    pub fn as_str(self) -> &'static str {
        // Variants are declared in `SNIPPET_HINT_FIELDS` order.
        fields::SNIPPET_HINT_FIELDS[self as usize]
    }

    pub fn from_field(field: &str) -> Option<Self> {
        HintField::ALL.into_iter().find(|hint| hint.as_str() == field)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for HintField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence flags for the six [`HintField`]s.
///
/// A field counts as present whether it came from a literal header, query or
/// cookie entry or was synthesized from a decoded rich payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintPresence(u8);

impl HintPresence {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        HintField::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, field: HintField) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: HintField) -> bool {
        self.0 & field.bit() != 0
    }

    /// True when every hint field is present.
    pub fn is_complete(&self) -> bool {
        *self == Self::all()
    }

    pub fn missing(&self) -> Vec<HintField> {
        HintField::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }
}

impl FromIterator<HintField> for HintPresence {
    fn from_iter<T: IntoIterator<Item = HintField>>(iter: T) -> Self {
        let mut presence = HintPresence::empty();
        for field in iter {
            presence.insert(field);
        }
        presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for hint in HintField::ALL {
            assert_eq!(HintField::from_field(hint.as_str()), Some(hint));
        }
        assert_eq!(HintField::from_field(fields::USER_AGENT), None);
        assert_eq!(HintField::from_field(fields::SEC_CH_UA_ARCH), None);
        assert_eq!(HintField::Brands.as_str(), fields::SEC_CH_UA);
        assert_eq!(
            HintField::FullVersionList.as_str(),
            fields::SEC_CH_UA_FULL_VERSION_LIST
        );
    }

    #[test]
    fn missing_lists_absent_fields() {
        let presence: HintPresence = [HintField::Brands, HintField::Mobile].into_iter().collect();
        assert!(!presence.is_complete());
        assert_eq!(
            presence.missing(),
            vec![
                HintField::Platform,
                HintField::PlatformVersion,
                HintField::Model,
                HintField::FullVersionList,
            ]
        );
        assert!(HintPresence::all().is_complete());
        assert!(HintPresence::all().missing().is_empty());
    }
}
