//! Position of a switch within a route's fixed acquisition order.

use std::fmt;

/// Which of a route's three switches is being acquired.
///
/// Routes are always acquired `First → Second → Third`; an agent's held set
/// is therefore always a prefix of [`RouteStep::ALL`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum RouteStep {
    First,
    Second,
    Third,
}

impl RouteStep {
    /// Every step, in acquisition order.
    pub const ALL: [RouteStep; 3] = [RouteStep::First, RouteStep::Second, RouteStep::Third];

    /// Zero-based position in the route triple.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The step after this one, or `None` after `Third`.
    pub fn next(self) -> Option<RouteStep> {
        match self {
            RouteStep::First  => Some(RouteStep::Second),
            RouteStep::Second => Some(RouteStep::Third),
            RouteStep::Third  => None,
        }
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteStep::First  => "first",
            RouteStep::Second => "second",
            RouteStep::Third  => "third",
        })
    }
}
