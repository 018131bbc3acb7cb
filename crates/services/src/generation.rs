//! Generation tickets that keep late provider responses from clobbering fresher state.

use std::fmt;

/// Monotonic counter identifying one content request issued by a session machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

/// Handed out when a load is issued; must be presented when the result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket is needed to apply the provider response"]
pub struct LoadTicket {
    generation: Generation,
}

impl LoadTicket {
    pub fn generation(self) -> Generation {
        self.generation
    }
}

/// Whether a provider result was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Start a new generation, invalidating every earlier ticket.
    pub(crate) fn issue(&mut self) -> LoadTicket {
        self.current = Generation(self.current.0.wrapping_add(1));
        LoadTicket {
            generation: self.current,
        }
    }

    pub(crate) fn current(&self) -> Generation {
        self.current
    }

    pub(crate) fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.current
    }
}
