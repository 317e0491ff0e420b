//! Structural eligibility of a candidate name for a DNS-backed claim.
//!
//! A name qualifies when it has exactly two dot-separated parts, `label.suffix`,
//! and the pair of lengths fits one of six shapes:
//!
//! | shape             | label                     | suffix      |
//! |-------------------|---------------------------|-------------|
//! | `ShortLabel`      | 3–6 chars                 | 1+ chars    |
//! | `EthLabel`        | 3–6 chars followed by `eth` | 1+ chars  |
//! | `TwoCharSuffix`   | 1–4 chars                 | 2 chars     |
//! | `ThreeCharSuffix` | 1–3 chars                 | 3 chars     |
//! | `FourCharSuffix`  | 1–2 chars                 | 4 chars     |
//! | `FiveCharSuffix`  | 1 char                    | 5 chars     |
//!
//! Lengths are counted in UTF-16 code units, so a character outside the
//! Basic Multilingual Plane counts as two.

use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Label prepended to a candidate name to locate its proof TXT record.
pub const PROOF_LABEL: &str = "_ens";

const ETH_MARKER: &str = "eth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameShape {
    ShortLabel,
    EthLabel,
    TwoCharSuffix,
    ThreeCharSuffix,
    FourCharSuffix,
    FiveCharSuffix,
}

impl NameShape {
    pub const ALL: [NameShape; 6] = [
        NameShape::ShortLabel,
        NameShape::EthLabel,
        NameShape::TwoCharSuffix,
        NameShape::ThreeCharSuffix,
        NameShape::FourCharSuffix,
        NameShape::FiveCharSuffix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameShape::ShortLabel => "short-label",
            NameShape::EthLabel => "eth-label",
            NameShape::TwoCharSuffix => "two-char-suffix",
            NameShape::ThreeCharSuffix => "three-char-suffix",
            NameShape::FourCharSuffix => "four-char-suffix",
            NameShape::FiveCharSuffix => "five-char-suffix",
        }
    }

    /// Checks this shape alone against an already split name. Neither part
    /// may contain a dot.
    pub fn matches(&self, label: &str, suffix: &str) -> bool {
        if label.contains('.') || suffix.contains('.') {
            return false;
        }
        let label_len = text_len(label);
        let suffix_len = text_len(suffix);

        match self {
            NameShape::ShortLabel => (3..=6).contains(&label_len) && suffix_len >= 1,
            NameShape::EthLabel => {
                suffix_len >= 1
                    && label
                        .strip_suffix(ETH_MARKER)
                        .is_some_and(|stem| (3..=6).contains(&text_len(stem)))
            }
            NameShape::TwoCharSuffix => (1..=4).contains(&label_len) && suffix_len == 2,
            NameShape::ThreeCharSuffix => (1..=3).contains(&label_len) && suffix_len == 3,
            NameShape::FourCharSuffix => (1..=2).contains(&label_len) && suffix_len == 4,
            NameShape::FiveCharSuffix => label_len == 1 && suffix_len == 5,
        }
    }
}

impl fmt::Display for NameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Splits `label.suffix`; anything with zero or more than one dot is `None`.
fn split_two_labels(name: &str) -> Option<(&str, &str)> {
    let (label, suffix) = name.split_once('.')?;
    if suffix.contains('.') {
        return None;
    }
    Some((label, suffix))
}

/// First shape the name satisfies, in the order of [`NameShape::ALL`].
pub fn classify(name: &str) -> Option<NameShape> {
    let (label, suffix) = split_two_labels(name)?;
    NameShape::ALL
        .into_iter()
        .find(|shape| shape.matches(label, suffix))
}

pub fn is_eligible(name: &str) -> bool {
    classify(name).is_some()
}

/// A name that has passed the eligibility gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateName {
    name: String,
    shape: NameShape,
}

impl CandidateName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        match classify(&name) {
            Some(shape) => Ok(Self { name, shape }),
            None => Err(DomainError::EligibilityRejected(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> NameShape {
        self.shape
    }

    /// `_ens.<name>`, the owner of the proof TXT record.
    pub fn proof_domain(&self) -> String {
        format!("{}.{}", PROOF_LABEL, self.name)
    }
}

impl fmt::Display for CandidateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for CandidateName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CandidateName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
