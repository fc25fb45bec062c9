use std::fmt;

/// What caused an auto-enter check.
///
/// The timeout criterion only holds for checks caused by the inactivity
/// timer firing. It never looks at how much time has passed so far; a check
/// caused by input always sees the timeout criterion as unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A buffer mutation caused the check
    Input,
    /// The inactivity timer fired
    Timer,
}

impl Trigger {
    /// Returns true if the check was caused by the timer
    pub fn is_timer(self) -> bool {
        matches!(self, Trigger::Timer)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Input => write!(f, "input"),
            Trigger::Timer => write!(f, "timer"),
        }
    }
}
