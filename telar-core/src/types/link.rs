//! Network link type.

use serde::{Deserialize, Serialize};

/// An undirected link between two VM nodes, identified by name.
///
/// Endpoints are stored in the order they were entered; equality for
/// dedup purposes ignores direction, use [`Link::connects`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// First endpoint
    pub from: String,

    /// Second endpoint
    pub to: String,
}

impl Link {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    /// Whether this link joins the given pair, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Whether this link touches the given node at either end.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }

    /// Endpoints as a (lesser, greater) pair, for canonical ordering.
    pub fn normalized(&self) -> (&str, &str) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -- {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_ignores_direction() {
        let link = Link::new("VM1", "VM2");
        assert!(link.connects("VM1", "VM2"));
        assert!(link.connects("VM2", "VM1"));
        assert!(!link.connects("VM1", "VM3"));
    }

    #[test]
    fn test_normalized_orders_endpoints() {
        assert_eq!(Link::new("VM2", "VM1").normalized(), ("VM1", "VM2"));
        assert_eq!(Link::new("VM1", "VM2").normalized(), ("VM1", "VM2"));
    }
}
