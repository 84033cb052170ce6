//! Candidate scoring and source selection.
//!
//! # Scoring
//!
//! A candidate that matches the desired item exactly (base item id and both
//! dye channels) wins outright. Otherwise each candidate gets a [`MatchScore`]:
//!
//! - `Valuable`: a desired channel holding a valuable dye is matched
//! - `Any`: some other non-empty desired channel is matched
//! - `None`: no channel matched
//!
//! The highest score wins. Ties go to the candidate seen first, so the order
//! in which candidates are offered is part of the policy.
//!
//! # Source Precedence
//!
//! [`pick_best_source`] offers the currently equipped item first and the
//! best rotating-storage entry second. The archive carries no dye data and
//! never competes on score; it is used only when neither of the other two
//! can supply the item. When storage and archive both hold the item,
//! storage is therefore preferred.

use glamour_model::{GlamourItem, ValuableDyes};

use crate::command::ItemSource;
use crate::source_cache::StorageEntry;

/// How well a candidate's dyes fit the desired dyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchScore {
    /// No desired channel matched.
    None = 0,
    /// A non-empty desired channel matched.
    Any = 1,
    /// A channel holding a valuable dye matched.
    Valuable = 2,
}

/// Scores `candidate` against `desired`.
#[must_use]
pub fn score(candidate: &GlamourItem, desired: &GlamourItem, valuable: &ValuableDyes) -> MatchScore {
    let first = !desired.dye1.is_none() && candidate.dye1 == desired.dye1;
    let second = !desired.dye2.is_none() && candidate.dye2 == desired.dye2;

    if (first && valuable.contains(desired.dye1)) || (second && valuable.contains(desired.dye2)) {
        MatchScore::Valuable
    } else if first || second {
        MatchScore::Any
    } else {
        MatchScore::None
    }
}

/// Same base item and same dyes. Variant offsets on the candidate are ignored.
#[must_use]
pub fn is_exact(candidate: &GlamourItem, desired: &GlamourItem) -> bool {
    candidate.item_id.base() == desired.item_id.base() && candidate.same_dyes(desired)
}

/// Picks the best of `candidates` for `desired`, by exact match first and
/// score second. Returns `None` only for an empty slice.
fn pick_best_by<'a, T>(
    candidates: &'a [T],
    item_of: impl Fn(&T) -> GlamourItem,
    desired: &GlamourItem,
    valuable: &ValuableDyes,
) -> Option<&'a T> {
    if let Some(exact) = candidates
        .iter()
        .find(|candidate| is_exact(&item_of(candidate), desired))
    {
        return Some(exact);
    }

    let mut best: Option<(&T, MatchScore)> = None;
    for candidate in candidates {
        let candidate_score = score(&item_of(candidate), desired, valuable);
        // Strictly greater: first-seen wins ties
        if best.map_or(true, |(_, best_score)| candidate_score > best_score) {
            best = Some((candidate, candidate_score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Picks the best rotating-storage entry for `desired`.
///
/// Callers pass only entries that share the desired item id.
#[must_use]
pub fn pick_best_match<'a>(
    candidates: &'a [StorageEntry],
    desired: &GlamourItem,
    valuable: &ValuableDyes,
) -> Option<&'a StorageEntry> {
    pick_best_by(candidates, |entry| entry.item, desired, valuable)
}

/// Where a winning candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// No source can supply the item.
    None,
    /// Keep the item already on the slot.
    CurrentlyEquipped,
    /// Take it from rotating storage at this slot index.
    RotatingStorage(u32),
    /// Take it from the archive at this index.
    ArchivalStore(u32),
}

impl CandidateSource {
    /// Returns true when nothing can supply the item.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The source to name in a `SetSlotItem`, or `None` when no write is needed.
    #[must_use]
    pub const fn item_source(self) -> Option<ItemSource> {
        match self {
            Self::RotatingStorage(index) => Some(ItemSource::RotatingStorage(index)),
            Self::ArchivalStore(index) => Some(ItemSource::ArchivalStore(index)),
            Self::None | Self::CurrentlyEquipped => None,
        }
    }
}

/// A source together with the item and dyes it would contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Where the item comes from.
    pub source: CandidateSource,
    /// What the slot would hold if this candidate wins.
    pub item: GlamourItem,
}

impl Candidate {
    /// The "nothing can supply this" result.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            source: CandidateSource::None,
            item: GlamourItem::cleared(),
        }
    }
}

/// Chooses between the equipped item, the best storage entry and the archive.
///
/// `occupant` must already be restricted to an item with the desired id.
#[must_use]
pub fn pick_best_source(
    occupant: Option<GlamourItem>,
    storage: Option<&StorageEntry>,
    archive: Option<u32>,
    desired: &GlamourItem,
    valuable: &ValuableDyes,
) -> Candidate {
    let pool: Vec<Candidate> = occupant
        .map(|item| Candidate {
            source: CandidateSource::CurrentlyEquipped,
            item,
        })
        .into_iter()
        .chain(storage.map(|entry| Candidate {
            source: CandidateSource::RotatingStorage(entry.slot),
            item: entry.item,
        }))
        .collect();

    if let Some(best) = pick_best_by(&pool, |candidate| candidate.item, desired, valuable) {
        return *best;
    }

    match archive {
        Some(index) => Candidate {
            source: CandidateSource::ArchivalStore(index),
            item: GlamourItem::undyed(desired.item_id),
        },
        None => Candidate::none(),
    }
}
