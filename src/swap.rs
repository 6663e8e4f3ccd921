//src/swap.rs
use serde::{Deserialize, Serialize};

/// Per-exercise swap state: the name shown at generation time followed by
/// its alternatives, and the position currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCycle {
    cycle: Vec<String>,
    index: usize,
}

impl SwapCycle {
    #[must_use]
    pub fn new(name: &str, alternatives: &[String]) -> Self {
        let mut cycle = Vec::with_capacity(alternatives.len() + 1);
        cycle.push(name.to_string());
        cycle.extend(
            alternatives
                .iter()
                .filter(|alt| !alt.is_empty() && alt.as_str() != name)
                .cloned(),
        );
        Self { cycle, index: 0 }
    }

    /// Advances to the next name, wrapping. Returns `false` when there is nothing to swap to.
    pub fn swap(&mut self) -> bool {
        if self.cycle.len() < 2 {
            return false;
        }
        self.index = (self.index + 1) % self.cycle.len();
        true
    }

    #[must_use]
    pub fn current(&self) -> &str {
        // cycle always holds the original name
        self.cycle.get(self.index).map_or("", String::as_str)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Every name in the cycle except the one on display.
    pub fn others(&self) -> impl Iterator<Item = &str> {
        let current = self.index;
        self.cycle
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != current)
            .map(|(_, name)| name.as_str())
    }

    /// Number of names in the cycle, the original included.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.cycle.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alts(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_cycle_wraps() {
        let mut swap = SwapCycle::new("Leg Press", &alts(&["Hack Squat", "Goblet Squat"]));
        assert_eq!(swap.current(), "Leg Press");
        assert!(swap.swap());
        assert_eq!(swap.current(), "Hack Squat");
        assert!(swap.swap());
        assert_eq!(swap.current(), "Goblet Squat");
        assert!(swap.swap());
        assert_eq!(swap.current(), "Leg Press");
        assert_eq!(swap.index(), 0);
    }

    #[test]
    fn test_filters_name_and_blanks() {
        let swap = SwapCycle::new("Cable Curl", &alts(&["Cable Curl", "", "Hammer Curl"]));
        assert_eq!(swap.option_count(), 2);
        assert_eq!(swap.others().collect::<Vec<_>>(), ["Hammer Curl"]);
    }

    #[test]
    fn test_single_entry_is_noop() {
        let mut swap = SwapCycle::new("Easy walk: 10–20 min", &alts(&["Easy walk: 10–20 min"]));
        assert!(!swap.swap());
        assert_eq!(swap.current(), "Easy walk: 10–20 min");
        assert_eq!(swap.index(), 0);
    }
}
