use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::iata;

/// A tour stop with just the fields leg planning needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GigForLeg {
    pub id: String,
    pub city: String,
    pub state: String,
    pub date: NaiveDate,
    pub venue_name: String,
}

impl GigForLeg {
    fn same_city_as(&self, other: &GigForLeg) -> bool {
        self.city == other.city && self.state == other.state
    }
}

/// Travel needed between two consecutive stops in different cities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    pub origin_gig_id: String,
    pub destination_gig_id: String,
    pub origin_city: String,
    pub destination_city: String,
    pub origin_code: String,
    pub destination_code: String,
    /// Day after the origin gig: perform at night, fly the next morning.
    pub departure_date: NaiveDate,
}

/// Derive flight legs from gigs already sorted by date ascending.
///
/// Adjacent pairs in the same city, or where either city has no known
/// airport, produce no leg. Neither case is an error; the remaining pairs are
/// still planned and keep their relative order.
pub fn plan_legs(gigs: &[GigForLeg]) -> Vec<FlightLeg> {
    gigs.windows(2)
        .filter_map(|pair| {
            let (origin, destination) = (&pair[0], &pair[1]);
            if origin.same_city_as(destination) {
                debug!(origin = %origin.id, destination = %destination.id, "Same city, no leg");
                return None;
            }
            Some((origin, destination))
        })
        .filter_map(|(origin, destination)| {
            let route = iata::resolve(&origin.city, &origin.state)
                .zip(iata::resolve(&destination.city, &destination.state));
            if route.is_none() {
                debug!(
                    origin = %iata::city_label(&origin.city, &origin.state),
                    destination = %iata::city_label(&destination.city, &destination.state),
                    "No airport for leg endpoint, skipping"
                );
            }
            route.map(|codes| (origin, destination, codes))
        })
        .filter_map(|(origin, destination, (origin_code, destination_code))| {
            let departure_date = origin.date.succ_opt()?;
            Some(FlightLeg {
                origin_gig_id: origin.id.clone(),
                destination_gig_id: destination.id.clone(),
                origin_city: iata::city_label(&origin.city, &origin.state),
                destination_city: iata::city_label(&destination.city, &destination.state),
                origin_code: origin_code.to_string(),
                destination_code: destination_code.to_string(),
                departure_date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gig(id: &str, city: &str, state: &str, date: &str) -> GigForLeg {
        GigForLeg {
            id: id.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            venue_name: format!("{} Hall", city),
        }
    }

    fn ymd(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fewer_than_two_gigs() {
        assert!(plan_legs(&[]).is_empty());
        assert!(plan_legs(&[gig("g1", "New York", "NY", "2026-04-10")]).is_empty());
    }

    #[test]
    fn test_five_city_tour() {
        let gigs = vec![
            gig("g1", "New York", "NY", "2026-04-10"),
            gig("g2", "Chicago", "IL", "2026-04-14"),
            gig("g3", "Austin", "TX", "2026-04-18"),
            gig("g4", "Los Angeles", "CA", "2026-04-23"),
            gig("g5", "Miami", "FL", "2026-04-28"),
        ];

        let legs = plan_legs(&gigs);
        assert_eq!(legs.len(), 4);

        let routes: Vec<(&str, &str)> = legs
            .iter()
            .map(|l| (l.origin_code.as_str(), l.destination_code.as_str()))
            .collect();
        assert_eq!(routes, vec![("JFK", "ORD"), ("ORD", "AUS"), ("AUS", "LAX"), ("LAX", "MIA")]);

        let dates: Vec<NaiveDate> = legs.iter().map(|l| l.departure_date).collect();
        assert_eq!(
            dates,
            vec![ymd("2026-04-11"), ymd("2026-04-15"), ymd("2026-04-19"), ymd("2026-04-24")]
        );

        assert_eq!(legs[0].origin_gig_id, "g1");
        assert_eq!(legs[0].destination_gig_id, "g2");
        assert_eq!(legs[0].origin_city, "New York, NY");
        assert_eq!(legs[0].destination_city, "Chicago, IL");
    }

    #[test]
    fn test_same_city_pair_is_skipped() {
        let gigs = vec![
            gig("g1", "New York", "NY", "2026-04-10"),
            gig("g2", "New York", "NY", "2026-04-12"),
            gig("g3", "Chicago", "IL", "2026-04-14"),
        ];

        let legs = plan_legs(&gigs);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].origin_gig_id, "g2");
        assert_eq!(legs[0].destination_gig_id, "g3");
        assert_eq!(legs[0].departure_date, ymd("2026-04-13"));
    }

    #[test]
    fn test_same_city_name_different_state_is_a_leg() {
        let gigs = vec![
            gig("g1", "Portland", "OR", "2026-05-01"),
            gig("g2", "Portland", "ME", "2026-05-03"),
        ];
        // Portland, ME has no airport entry, so the pair is still dropped,
        // but by resolution rather than by the same-city rule.
        assert!(plan_legs(&gigs).is_empty());

        let gigs = vec![
            gig("g1", "Kansas City", "MO", "2026-05-01"),
            gig("g2", "St. Louis", "MO", "2026-05-03"),
        ];
        assert_eq!(plan_legs(&gigs).len(), 1);
    }

    #[test]
    fn test_unknown_city_drops_both_adjacent_pairs() {
        let gigs = vec![
            gig("g1", "New York", "NY", "2026-04-10"),
            gig("g2", "Smallville", "KS", "2026-04-12"),
            gig("g3", "Chicago", "IL", "2026-04-14"),
        ];
        assert!(plan_legs(&gigs).is_empty());
    }

    #[test]
    fn test_unknown_city_does_not_stop_later_pairs() {
        let gigs = vec![
            gig("g1", "Smallville", "KS", "2026-04-10"),
            gig("g2", "Denver", "CO", "2026-04-12"),
            gig("g3", "Seattle", "WA", "2026-04-14"),
        ];
        let legs = plan_legs(&gigs);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].origin_code, "DEN");
        assert_eq!(legs[0].destination_code, "SEA");
    }

    #[test]
    fn test_departure_rolls_over_month_and_year() {
        let gigs = vec![
            gig("g1", "Boston", "MA", "2026-01-31"),
            gig("g2", "Atlanta", "GA", "2026-02-02"),
        ];
        assert_eq!(plan_legs(&gigs)[0].departure_date, ymd("2026-02-01"));

        let gigs = vec![
            gig("g1", "Boston", "MA", "2026-04-30"),
            gig("g2", "Atlanta", "GA", "2026-05-02"),
        ];
        assert_eq!(plan_legs(&gigs)[0].departure_date, ymd("2026-05-01"));

        let gigs = vec![
            gig("g1", "Boston", "MA", "2026-12-31"),
            gig("g2", "Atlanta", "GA", "2027-01-02"),
        ];
        assert_eq!(plan_legs(&gigs)[0].departure_date, ymd("2027-01-01"));

        let gigs = vec![
            gig("g1", "Boston", "MA", "2028-02-28"),
            gig("g2", "Atlanta", "GA", "2028-03-02"),
        ];
        assert_eq!(plan_legs(&gigs)[0].departure_date, ymd("2028-02-29"));
    }

    #[test]
    fn test_leg_wire_format() {
        let gigs = vec![
            gig("g1", "New York", "NY", "2026-04-10"),
            gig("g2", "Chicago", "IL", "2026-04-14"),
        ];
        let json = serde_json::to_value(&plan_legs(&gigs)[0]).unwrap();
        assert_eq!(json["originGigId"], "g1");
        assert_eq!(json["destinationCode"], "ORD");
        assert_eq!(json["departureDate"], "2026-04-11");
    }

    #[test]
    fn test_gig_deserialization() {
        let json = r#"
            {
                "id": "g1",
                "city": "Austin",
                "state": "TX",
                "date": "2026-04-18",
                "venue_name": "Stubb's"
            }
        "#;
        let gig: GigForLeg = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(gig.date, ymd("2026-04-18"));

        let bad = json.replace("2026-04-18", "04/18/2026");
        assert!(serde_json::from_str::<GigForLeg>(&bad).is_err());
    }
}
