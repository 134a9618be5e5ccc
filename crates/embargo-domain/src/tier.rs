use crate::model::ContentObject;
use std::collections::BTreeSet;

/// Visibility tier of a bundle, decided by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Always fully public, bundle and bitstreams (license, metadata).
    Public,
    /// Container must be public, bitstreams may be protected (text, thumbnails).
    Visible,
    /// Everything else.
    Restricted,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Public => "public",
            Tier::Visible => "visible",
            Tier::Restricted => "restricted",
        }
    }
}

/// Configured bundle-name sets. Names are matched exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleTiers {
    pub public: BTreeSet<String>,
    pub visible: BTreeSet<String>,
}

impl Default for BundleTiers {
    fn default() -> Self {
        Self {
            public: ["LICENSE", "LICENCE", "METADATA", "CC-LICENSE"]
                .into_iter()
                .map(String::from)
                .collect(),
            visible: ["TEXT", "THUMBNAIL"].into_iter().map(String::from).collect(),
        }
    }
}

impl BundleTiers {
    pub fn classify(&self, bundle_name: &str) -> Tier {
        if self.public.contains(bundle_name) {
            Tier::Public
        } else if self.visible.contains(bundle_name) {
            Tier::Visible
        } else {
            Tier::Restricted
        }
    }
}

pub fn classify_bundle(bundle: &ContentObject, tiers: &BundleTiers) -> Tier {
    tiers.classify(&bundle.name)
}
