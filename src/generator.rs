//! Random booking-queue generation.
//!
//! Input generation is the only source of randomness in a scheduling run;
//! pass a seeded RNG for reproducible queues.

use rand::Rng;

use crate::models::SimUser;

/// Latest arrival minute.
pub const MAX_ARRIVAL: i64 = 20;
/// Booking time range in minutes.
pub const BOOKING_TIME_RANGE: std::ops::RangeInclusive<i64> = 1..=10;
/// Connection speed range in Mbps.
pub const SPEED_RANGE: std::ops::RangeInclusive<u32> = 1..=100;
/// Explicit priority rank range.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Generates `count` users with ids `1..=count`, sorted by arrival time.
///
/// Users arriving in the same minute keep id order.
pub fn generate_users<R: Rng>(count: u32, rng: &mut R) -> Vec<SimUser> {
    let mut users: Vec<SimUser> = (1..=count)
        .map(|id| {
            SimUser::new(
                id,
                rng.random_range(0..=MAX_ARRIVAL),
                rng.random_range(BOOKING_TIME_RANGE),
            )
            .with_speed(rng.random_range(SPEED_RANGE))
            .with_priority(rng.random_range(PRIORITY_RANGE))
        })
        .collect();
    users.sort_by_key(|u| u.arrival_time);
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::validation::validate_users;

    #[test]
    fn test_generated_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let users = generate_users(200, &mut rng);

        assert_eq!(users.len(), 200);
        for user in &users {
            assert!((0..=MAX_ARRIVAL).contains(&user.arrival_time));
            assert!(BOOKING_TIME_RANGE.contains(&user.booking_time));
            assert!(SPEED_RANGE.contains(&user.speed));
            assert!(user.priority.is_some_and(|p| PRIORITY_RANGE.contains(&p)));
        }
        assert!(validate_users(&users).is_ok());
    }

    #[test]
    fn test_sorted_by_arrival() {
        let mut rng = StdRng::seed_from_u64(7);
        let users = generate_users(50, &mut rng);
        assert!(users.windows(2).all(|w| w[0].arrival_time <= w[1].arrival_time));
        assert!(users
            .windows(2)
            .filter(|w| w[0].arrival_time == w[1].arrival_time)
            .all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = generate_users(20, &mut StdRng::seed_from_u64(9));
        let b = generate_users(20, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_users() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_users(0, &mut rng).is_empty());
    }
}
