use serde::{Deserialize, Serialize};

/// Head counts for the five pricing identities of a group quote.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticipantCounts {
    pub adult: u32,
    pub child_with_bed: u32,
    pub child_no_bed: u32,
    pub single_room: u32,
    pub infant: u32,
}

impl ParticipantCounts {
    /// Paying group size: every identity except infants.
    pub fn group_size(&self) -> u32 {
        self.adult + self.child_with_bed + self.child_no_bed + self.single_room
    }

    /// Divisor for guide and group-transport cost sharing. Computed on its
    /// own rather than aliasing `group_size` so the two call sites stay
    /// independently auditable.
    pub fn group_size_for_guide(&self) -> u32 {
        self.adult + self.child_with_bed + self.child_no_bed + self.single_room
    }

    pub fn total_with_infants(&self) -> u32 {
        self.group_size() + self.infant
    }
}

/// Derived per-identity cost vector produced by the pricing engine.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct IdentityCosts {
    pub adult: f64,
    pub child_with_bed: f64,
    pub child_no_bed: f64,
    pub single_room: f64,
    pub infant: f64,
}

/// Per-identity selling prices entered by staff.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct SellingPrices {
    pub adult: f64,
    pub child_with_bed: f64,
    pub child_no_bed: f64,
    pub single_room: f64,
    pub infant: f64,
}

/// Per-identity profit, always selling price minus cost.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct IdentityProfits {
    pub adult: f64,
    pub child_with_bed: f64,
    pub child_no_bed: f64,
    pub single_room: f64,
    pub infant: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_size_excludes_infants() {
        let counts = ParticipantCounts {
            adult: 10,
            child_with_bed: 3,
            child_no_bed: 2,
            single_room: 1,
            infant: 4,
        };

        assert_eq!(counts.group_size(), 16);
        assert_eq!(counts.group_size_for_guide(), 16);
        assert_eq!(counts.total_with_infants(), 20);
    }

    #[test]
    fn empty_counts_sum_to_zero() {
        let counts = ParticipantCounts::default();
        assert_eq!(counts.group_size(), 0);
        assert_eq!(counts.group_size_for_guide(), 0);
    }
}
