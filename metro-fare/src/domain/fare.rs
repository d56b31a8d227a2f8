//! Distance-based fare tiers.
//!
//! Fares are a step function of the distance travelled beyond the network's
//! free allowance. The first 6 km beyond the allowance cost the base fare,
//! the next brackets add one unit each, and beyond 32 km every further full
//! 20 km adds one more unit.

/// Fare amount in whole currency units.
pub type Fare = i64;

/// The cheapest fare any trip can cost.
pub const BASE_FARE: Fare = 3;

/// Upper bounds (inclusive, net metres) of the fixed tiers and their fares.
const TIERS: [(i64, Fare); 4] = [(6_000, 3), (12_000, 4), (22_000, 5), (32_000, 6)];

/// Net distance beyond which the open-ended tier starts.
const OPEN_TIER_START: i64 = 32_000;

/// Width of each step in the open-ended tier.
const OPEN_TIER_STEP: i64 = 20_000;

/// Fare of the first open-ended step.
const OPEN_TIER_BASE: Fare = 7;

/// Compute the fare for a trip of `traveled` metres on a network whose free
/// allowance is `free_distance` metres.
///
/// Total over all inputs. The subtraction saturates, so extreme values still
/// land in the first or last tier rather than overflowing.
///
/// # Examples
///
/// ```
/// use metro_fare::domain::price;
///
/// assert_eq!(price(0, 6000), 3);
/// assert_eq!(price(12_000, 6000), 3);
/// assert_eq!(price(18_000, 6000), 4);
/// assert_eq!(price(38_001, 6000), 7);
/// ```
pub fn price(traveled: i64, free_distance: i64) -> Fare {
    let net = traveled.saturating_sub(free_distance);

    // Equivalent to `traveled <= 0` for ordinary allowances. Kept as written
    // in the published fare rules; only the origin itself reaches it.
    if net <= free_distance.saturating_neg() {
        return BASE_FARE;
    }

    for (upper, fare) in TIERS {
        if net <= upper {
            return fare;
        }
    }

    OPEN_TIER_BASE + (net - OPEN_TIER_START) / OPEN_TIER_STEP
}

/// Fare for distances as the graph stores them (unsigned metres).
pub fn price_for_distance(traveled: u64, free_distance: u64) -> Fare {
    price(saturating_signed(traveled), saturating_signed(free_distance))
}

fn saturating_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
