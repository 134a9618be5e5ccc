//! Everything the rules look at for one item, fetched once from the collaborators.

use crate::model::Item;
use crate::policy::EffectiveConfig;
use crate::source::{ContentSource, GroupDirectory, SourceResult};
use crate::terms::{parse_terms, Availability, EmbargoTerms};
use crate::tier::{classify_bundle, Tier};
use crate::visibility::ObjectState;
use time::Date;

#[derive(Clone, Debug)]
pub struct BundleState {
    pub tier: Tier,
    pub bundle: ObjectState,
    pub bitstreams: Vec<ObjectState>,
}

#[derive(Clone, Debug)]
pub struct AuditSnapshot {
    pub item: Item,
    pub item_state: ObjectState,
    pub terms: EmbargoTerms,
    pub availability: Availability,
    pub bundles: Vec<BundleState>,
    /// Date every temporal rule is evaluated against.
    pub today: Date,
}

impl AuditSnapshot {
    pub fn load<S, D>(
        item: &Item,
        source: &S,
        directory: &D,
        cfg: &EffectiveConfig,
        today: Date,
    ) -> SourceResult<Self>
    where
        S: ContentSource + ?Sized,
        D: GroupDirectory + ?Sized,
    {
        let item_state =
            ObjectState::load(item.object.clone(), source, directory, &cfg.roles, today)?;
        Self::load_with_item_state(item, item_state, source, directory, cfg, today)
    }

    /// Like [`AuditSnapshot::load`], reusing an already classified item node.
    pub fn load_with_item_state<S, D>(
        item: &Item,
        item_state: ObjectState,
        source: &S,
        directory: &D,
        cfg: &EffectiveConfig,
        today: Date,
    ) -> SourceResult<Self>
    where
        S: ContentSource + ?Sized,
        D: GroupDirectory + ?Sized,
    {
        let declared = source.declared_embargo_value(item)?;
        let terms = parse_terms(declared.as_deref(), cfg.open_sentinel.as_deref());
        let available = source.available_date(item)?;
        let availability = Availability::from_raw(available.as_deref(), today);

        let mut bundles = Vec::new();
        for node in source.bundle_tree(item)? {
            let tier = classify_bundle(&node.bundle, &cfg.bundles);
            let bundle = ObjectState::load(node.bundle, source, directory, &cfg.roles, today)?;
            let bitstreams = node
                .bitstreams
                .into_iter()
                .map(|bs| ObjectState::load(bs, source, directory, &cfg.roles, today))
                .collect::<SourceResult<Vec<_>>>()?;
            bundles.push(BundleState {
                tier,
                bundle,
                bitstreams,
            });
        }

        Ok(Self {
            item: item.clone(),
            item_state,
            terms,
            availability,
            bundles,
            today,
        })
    }

    /// Item, bundles and bitstreams, in tree order.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectState> {
        std::iter::once(&self.item_state).chain(
            self.bundles
                .iter()
                .flat_map(|b| std::iter::once(&b.bundle).chain(b.bitstreams.iter())),
        )
    }

    /// Bundles outside the public tier.
    pub fn non_public_bundles(&self) -> impl Iterator<Item = &BundleState> {
        self.bundles.iter().filter(|b| b.tier != Tier::Public)
    }

    /// Bundle and bitstream nodes outside the public tier.
    pub fn non_public_objects(&self) -> impl Iterator<Item = &ObjectState> {
        self.non_public_bundles()
            .flat_map(|b| std::iter::once(&b.bundle).chain(b.bitstreams.iter()))
    }

    pub fn is_under_embargo(&self) -> bool {
        self.terms.is_embargoed_on(self.today)
    }

    /// True when any bitstream in a restricted-tier bundle is protected.
    pub fn has_protected_content(&self) -> bool {
        self.bundles
            .iter()
            .filter(|b| b.tier == Tier::Restricted)
            .flat_map(|b| b.bitstreams.iter())
            .any(|bs| bs.visibility.is_protected())
    }
}
