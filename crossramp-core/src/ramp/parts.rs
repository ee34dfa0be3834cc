//! Plain-field view of a filled ramp for persistence

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Ramp, table::TransitionTable};
use crate::{Error, Key, RegionId, Segment, Side, Transition, Weight};

/// All fields of a [`Ramp`], as written to and read back from storage.
///
/// Transitions are kept as a list sorted by key so the persisted form does
/// not depend on hash map iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampParts {
    pub region: RegionId,
    pub transitions: Vec<(Key, Transition)>,
    pub enters: Vec<Segment>,
    pub exits: Vec<Segment>,
    pub weights: Vec<Weight>,
}

impl Ramp {
    pub fn to_parts(&self) -> RampParts {
        RampParts {
            region: self.table.region,
            transitions: sorted_transitions(&self.table.transitions),
            enters: self.table.enters.clone(),
            exits: self.table.exits.clone(),
            weights: self.weights.clone(),
        }
    }

    pub fn into_parts(self) -> RampParts {
        RampParts {
            region: self.table.region,
            transitions: sorted_transitions(&self.table.transitions),
            enters: self.table.enters,
            exits: self.table.exits,
            weights: self.weights,
        }
    }

    /// Rebuilds a ramp from pre-populated fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the weight matrix does not match
    /// the enter and exit lists, a key is repeated, a cross id belongs to
    /// several features, or a transition points at a missing or mismatching
    /// segment.
    pub fn from_parts(parts: RampParts) -> Result<Self, Error> {
        let RampParts {
            region,
            transitions,
            enters,
            exits,
            weights,
        } = parts;

        let expected = enters.len().checked_mul(exits.len()).ok_or_else(|| {
            Error::InvalidData(format!(
                "{} enters x {} exits overflow the weight matrix",
                enters.len(),
                exits.len()
            ))
        })?;
        if weights.len() != expected {
            return Err(Error::InvalidData(format!(
                "Expected {expected} weights for {} enters and {} exits, got {}",
                enters.len(),
                exits.len(),
                weights.len()
            )));
        }

        if let Some(segment) = enters.iter().chain(&exits).find(|s| s.region != region) {
            return Err(Error::InvalidData(format!(
                "Segment {segment} does not belong to {region}"
            )));
        }

        let mut table = TransitionTable::new(region);
        table.enters = enters;
        table.exits = exits;

        for (key, transition) in transitions {
            validate_transition(&table, key, &transition)?;
            if let Some(cross_id) = transition.cross_id {
                let owner = *table.cross_ids.entry(cross_id).or_insert(key.feature_id);
                if owner != key.feature_id {
                    return Err(Error::InvalidData(format!(
                        "Cross id {cross_id} is shared by features {owner} and {}",
                        key.feature_id
                    )));
                }
            }
            if table.transitions.insert(key, transition).is_some() {
                return Err(Error::InvalidData(format!(
                    "Transition {}/{} is listed twice",
                    key.feature_id, key.segment_index
                )));
            }
        }

        Ok(Ramp::from_table(table, weights))
    }
}

fn sorted_transitions(transitions: &HashMap<Key, Transition>) -> Vec<(Key, Transition)> {
    transitions
        .iter()
        .map(|(key, transition)| (*key, transition.clone()))
        .sorted_unstable_by_key(|(key, _)| *key)
        .collect()
}

fn validate_transition(
    table: &TransitionTable,
    key: Key,
    transition: &Transition,
) -> Result<(), Error> {
    let invalid = |reason: &str| {
        Err(Error::InvalidData(format!(
            "Transition {}/{}: {reason}",
            key.feature_id, key.segment_index
        )))
    };

    match transition.side {
        Side::OneWayEnter(_) if !transition.forward_is_enter => {
            return invalid("one-way enter must enter in the forward direction");
        }
        Side::OneWayExit(_) if transition.forward_is_enter => {
            return invalid("one-way exit must leave in the forward direction");
        }
        _ => {}
    }

    let enter_is_forward = transition.forward_is_enter;
    if let Some(idx) = transition.enter_index() {
        match table.enters.get(idx as usize) {
            Some(s) if s.key() == key && s.is_forward == enter_is_forward => {}
            Some(_) => return invalid("enter segment does not match the transition"),
            None => return invalid("enter index out of range"),
        }
    }
    if let Some(idx) = transition.exit_index() {
        match table.exits.get(idx as usize) {
            Some(s) if s.key() == key && s.is_forward != enter_is_forward => {}
            Some(_) => return invalid("exit segment does not match the transition"),
            None => return invalid("exit index out of range"),
        }
    }
    Ok(())
}

impl From<Ramp> for RampParts {
    fn from(ramp: Ramp) -> Self {
        ramp.into_parts()
    }
}

impl TryFrom<RampParts> for Ramp {
    type Error = Error;

    fn try_from(parts: RampParts) -> Result<Self, Self::Error> {
        Ramp::from_parts(parts)
    }
}
