use crate::config::ConfigError;
use crate::model::SlotId;
use thiserror::Error;

/// Motif de refus d'une modification manuelle. Le planning reste inchangé.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverrideError {
    #[error("member not found: {0}")]
    UnknownMember(String),
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
    #[error("{member} is not assigned to {slot}")]
    NotInSlot { member: String, slot: SlotId },
    #[error("cannot move to the same slot")]
    SameSlot,
    #[error("cannot assign to a globally restricted time slot ({0})")]
    RestrictedSlot(SlotId),
    #[error("{member} is not available during {slot}")]
    Unavailable { member: String, slot: SlotId },
    #[error("{0} is already assigned to this slot")]
    AlreadyAssigned(String),
    #[error("{member} would exceed the maximum hours limit ({limit} hours)")]
    ExceedsMaxHours { member: String, limit: f64 },
    #[error("the target slot is already full ({capacity} people)")]
    SlotFull { capacity: usize },
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("member name cannot be empty")]
    EmptyMemberName,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
