//! Normalisation des déclarations de disponibilité.

use crate::catalog::SlotCatalog;
use crate::model::{Member, SlotId};
use crate::restriction::RestrictionSet;
use std::collections::BTreeSet;

/// Découpe une liste `id1, id2, ...` : minuscules, trim, sans vides ni doublons.
pub fn parse_slot_list(raw: &str) -> BTreeSet<SlotId> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(SlotId::new)
        .collect()
}

/// Comme [`parse_slot_list`], puis retire les créneaux restreints.
pub fn normalize(raw: &str, restrictions: &RestrictionSet) -> BTreeSet<SlotId> {
    let mut ids = parse_slot_list(raw);
    ids.retain(|id| !restrictions.contains(id));
    ids
}

impl Member {
    /// Disponibilité = catalogue − occupé − restrictions.
    pub fn from_busy<N, I>(
        name: N,
        busy: I,
        catalog: &SlotCatalog,
        restrictions: &RestrictionSet,
    ) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = SlotId>,
    {
        let busy: BTreeSet<SlotId> = busy.into_iter().collect();
        let availability = catalog
            .iter()
            .map(|s| &s.id)
            .filter(|id| !busy.contains(*id) && !restrictions.contains(id))
            .cloned()
            .collect();
        Member::new(name, availability)
    }

    /// Depuis une déclaration brute de créneaux libres.
    pub fn from_declared<N: Into<String>>(name: N, raw: &str, restrictions: &RestrictionSet) -> Self {
        Member::new(name, normalize(raw, restrictions))
    }
}
