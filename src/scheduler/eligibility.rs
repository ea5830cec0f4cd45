//! Court eligibility.
//!
//! Each court tier has its own ordered court list per day. The first
//! bookable court in the list wins, so list order is the preference order.

use crate::models::{Match, Venue};

/// Ordered courts `m` may use at a slot starting at `minute`.
pub fn eligible_courts<'v>(venue: &'v Venue, m: &Match, minute: u32) -> &'v [u32] {
    venue.courts_for(m.tier, minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourtTier, PlayerSlot, Slot};

    fn with_tier(tier: CourtTier) -> Match {
        Match::new(
            "X",
            "Pool",
            1,
            PlayerSlot::new("A", Slot::Players(vec!["A".into()])),
            PlayerSlot::new("B", Slot::Players(vec!["B".into()])),
        )
        .with_tier(tier)
    }

    #[test]
    fn test_tier_lists() {
        let v = Venue::default();
        assert_eq!(eligible_courts(&v, &with_tier(CourtTier::Elite), 0), &[5, 6, 7, 8]);
        assert_eq!(
            eligible_courts(&v, &with_tier(CourtTier::Secondary), 0),
            &[5, 6, 7, 8, 1, 2, 3, 4, 9, 10, 11, 12]
        );
        assert_eq!(
            eligible_courts(&v, &with_tier(CourtTier::Secondary), 1440),
            &[5, 6, 7, 8, 1, 2, 3, 4]
        );
        assert_eq!(
            eligible_courts(&v, &with_tier(CourtTier::Junior), 0),
            &[9, 10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(
            eligible_courts(&v, &with_tier(CourtTier::General), 0),
            &[1, 2, 3, 4, 9, 10, 11, 12, 5, 6, 7, 8]
        );
        assert_eq!(
            eligible_courts(&v, &with_tier(CourtTier::General), 1500),
            &[1, 2, 3, 4, 5, 6, 7, 8]
        );
    }
}
