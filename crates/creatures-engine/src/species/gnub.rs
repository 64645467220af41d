//! Gnubs do nothing at all and die out.

use creatures_agents::{Behavior, Blueprint, NewCreature};
use creatures_types::Footprint;

/// Kind name.
pub const KIND: &str = "Gnub";

/// A fresh gnub.
pub fn gnub() -> NewCreature {
    NewCreature::new(Blueprint::new(KIND, Footprint::new(15, 15)), Gnub)
}

/// Gnub behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gnub;

impl Behavior for Gnub {}
