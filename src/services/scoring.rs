/// Relevance scoring for trip recommendations.
///
/// A trip earns 2 points for every keyword of every selected interest found
/// in its title, location, or description, plus a bonus of up to 4 points
/// when its price is close to the average price of recently viewed trips.
use crate::models::{InterestSelection, ScoredTrip, Trip, ViewedHistory};

/// Number of trips published in the recommendation list
pub const RECOMMENDATION_LIMIT: usize = 6;

const KEYWORD_POINTS: u32 = 2;

/// Scores a single trip against the active interests and the average price
/// of recently viewed trips
///
/// `average_viewed_price` is ignored unless positive, so an empty history
/// never awards a price bonus.
pub fn score_trip(trip: &Trip, interests: &InterestSelection, average_viewed_price: f64) -> u32 {
    let text = format!("{} {} {}", trip.title, trip.location, trip.description).to_lowercase();

    let keyword_hits: u32 = interests
        .iter()
        .flat_map(|tag| tag.keywords())
        .filter(|keyword| text.contains(*keyword))
        .map(|_| KEYWORD_POINTS)
        .sum();

    keyword_hits + price_bonus(trip.price, average_viewed_price)
}

fn price_bonus(price: f64, average_viewed_price: f64) -> u32 {
    if !(average_viewed_price > 0.0) {
        return 0;
    }

    let diff = (price - average_viewed_price).abs() / average_viewed_price;
    if diff < 0.2 {
        4
    } else if diff < 0.4 {
        2
    } else if diff < 0.6 {
        1
    } else {
        0
    }
}

/// Mean price of the given trips, or 0 when there are none
pub fn average_price<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> f64 {
    let (total, count) = trips
        .into_iter()
        .fold((0.0, 0u32), |(total, count), trip| (total + trip.price, count + 1));

    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

/// Scores `candidates`, drops anything already viewed, and keeps the best
/// `limit` trips
///
/// The sort is stable: trips with equal scores keep their input order.
pub fn rank<'a>(
    candidates: impl IntoIterator<Item = &'a Trip>,
    interests: &InterestSelection,
    average_viewed_price: f64,
    viewed: &ViewedHistory,
    limit: usize,
) -> Vec<ScoredTrip> {
    let mut scored: Vec<ScoredTrip> = candidates
        .into_iter()
        .filter(|trip| !viewed.contains(trip.id))
        .map(|trip| ScoredTrip {
            score: score_trip(trip, interests, average_viewed_price),
            trip: trip.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InterestTag, TripId};

    fn trip(id: u64, title: &str, price: f64) -> Trip {
        Trip {
            id: TripId(id),
            title: title.to_string(),
            location: String::new(),
            description: String::new(),
            price,
            duration_days: 3,
            country: None,
            image: None,
        }
    }

    fn interests(tags: &[InterestTag]) -> InterestSelection {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_keyword_match_scores_two_points() {
        let beach = trip(1, "Beach Paradise", 1000.0);
        let trek = trip(2, "Mountain Trek", 1100.0);
        let selected = interests(&[InterestTag::Beach]);

        assert_eq!(score_trip(&beach, &selected, 0.0), 2);
        assert_eq!(score_trip(&trek, &selected, 0.0), 0);
    }

    #[test]
    fn test_every_keyword_hit_counts() {
        let mut bali = trip(1, "Bali Beach Escape", 900.0);
        bali.location = "Bali island".to_string();
        bali.description = "Ocean views along the coast".to_string();

        // bali, beach, island, ocean, coast
        assert_eq!(score_trip(&bali, &interests(&[InterestTag::Beach]), 0.0), 10);
    }

    #[test]
    fn test_shared_keyword_counts_once_per_interest() {
        let valley = trip(1, "Valley Walk", 500.0);
        let selected = interests(&[InterestTag::Adventure, InterestTag::Mountains]);

        assert_eq!(score_trip(&valley, &selected, 0.0), 4);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let city = trip(1, "PARISIAN nights", 700.0);
        assert_eq!(score_trip(&city, &interests(&[InterestTag::City]), 0.0), 2);
    }

    #[test]
    fn test_price_bonus_tiers() {
        let selected = InterestSelection::new();
        assert_eq!(score_trip(&trip(1, "x", 1050.0), &selected, 1000.0), 4);
        assert_eq!(score_trip(&trip(1, "x", 1300.0), &selected, 1000.0), 2);
        assert_eq!(score_trip(&trip(1, "x", 500.0), &selected, 1000.0), 1);
        assert_eq!(score_trip(&trip(1, "x", 1600.0), &selected, 1000.0), 0);
    }

    #[test]
    fn test_no_price_bonus_without_history() {
        let selected = InterestSelection::new();
        assert_eq!(score_trip(&trip(1, "x", 1000.0), &selected, 0.0), 0);
        assert_eq!(score_trip(&trip(1, "x", 1000.0), &selected, -5.0), 0);
        assert_eq!(score_trip(&trip(1, "x", 1000.0), &selected, f64::NAN), 0);
    }

    #[test]
    fn test_score_never_decreases_as_interests_are_added() {
        let mut kyoto = trip(1, "Kyoto temple trek", 1200.0);
        kyoto.description = "Ancient heritage and mountain peaks".to_string();

        let mut selected = InterestSelection::new();
        let mut previous = score_trip(&kyoto, &selected, 0.0);
        for tag in InterestTag::ALL {
            selected.insert(tag);
            let current = score_trip(&kyoto, &selected, 0.0);
            assert!(current >= previous, "adding {} lowered the score", tag);
            previous = current;
        }
        assert!(previous > 0);
    }

    #[test]
    fn test_average_price() {
        let trips = vec![trip(1, "a", 1000.0), trip(2, "b", 2000.0)];
        assert_eq!(average_price(&trips), 1500.0);
        assert_eq!(average_price(&Vec::<Trip>::new()), 0.0);
    }

    #[test]
    fn test_rank_orders_by_score_then_input_order() {
        let catalog = vec![
            trip(1, "Quiet Town", 100.0),
            trip(2, "Beach Paradise", 1000.0),
            trip(3, "Old Farm", 100.0),
            trip(4, "Island Beach Hop", 1000.0),
        ];
        let ranked = rank(
            &catalog,
            &interests(&[InterestTag::Beach]),
            0.0,
            &ViewedHistory::new(),
            RECOMMENDATION_LIMIT,
        );

        let ids: Vec<u64> = ranked.iter().map(|s| s.id().0).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
        assert_eq!(ranked[0].score, 4);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let catalog: Vec<Trip> = (1..=5).map(|i| trip(i, "Plain", 100.0)).collect();
        let ranked = rank(&catalog, &InterestSelection::new(), 0.0, &ViewedHistory::new(), 6);

        let ids: Vec<u64> = ranked.iter().map(|s| s.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(ranked.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_rank_excludes_viewed_and_truncates() {
        let catalog: Vec<Trip> = (1..=10).map(|i| trip(i, "Plain", 100.0)).collect();
        let viewed = ViewedHistory::from_ids([TripId(1), TripId(3)]);
        let ranked = rank(&catalog, &InterestSelection::new(), 0.0, &viewed, RECOMMENDATION_LIMIT);

        let ids: Vec<u64> = ranked.iter().map(|s| s.id().0).collect();
        assert_eq!(ids, vec![2, 4, 5, 6, 7, 8]);
    }
}
