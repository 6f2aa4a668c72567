//! # Transient Notices
//!
//! A notice is a short user-facing message that clears itself after a delay.
//! Each `set` or `clear` bumps a generation counter; an expiry timer carries
//! the generation it was started for and only clears the notice if nothing
//! has replaced it since. So at most one timer is ever effective, and no
//! path needs to remember to cancel the previous one.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notice {
    message: Option<String>,
    generation: u64,
}

impl Notice {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shows `message` and returns the generation an expiry timer must carry.
    pub fn set(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// Clears the notice and invalidates any pending expiry.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.message = None;
    }

    /// Clears the notice if `generation` is still current. Returns whether it did.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }
}
