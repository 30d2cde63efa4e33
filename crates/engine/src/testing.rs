//! Journey fixtures shared by the engine's unit tests.

use attribution_core::types::{Journey, Touchpoint, DIRECT_TRAFFIC};
use chrono::{TimeZone, Utc};

/// Google Ads → Email Campaign → Direct Traffic, worth 10,000.
pub fn j1() -> Journey {
    Journey::new(
        "J1",
        "Aarav Sharma",
        10_000.0,
        vec![
            Touchpoint::new(1, "Google Ads", "Click", 10, 100.0),
            Touchpoint::new(2, "Email Campaign", "Open", 3, 20.0),
            Touchpoint::new(3, DIRECT_TRAFFIC, "Visit", 0, 0.0),
        ],
    )
    .unwrap()
}

fn dated(journey: Journey, day: u32) -> Journey {
    journey.with_conversion_date(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
}

/// Five journeys: four dated across three days, one all-direct, one undated
/// single-touchpoint journey.
pub fn sample_dataset() -> Vec<Journey> {
    vec![
        dated(j1(), 1),
        dated(
            Journey::new(
                "J2",
                "Diya Kumar",
                4_200.0,
                vec![
                    Touchpoint::new(1, "Facebook Ads", "View", 14, 250.0),
                    Touchpoint::new(2, "Organic Search", "Click", 6, 0.0),
                    Touchpoint::new(3, "LinkedIn", "Engagement", 2, 300.0),
                    Touchpoint::new(4, DIRECT_TRAFFIC, "Visit", 0, 0.0),
                ],
            )
            .unwrap(),
            1,
        ),
        dated(
            Journey::new(
                "J3",
                "Kavya Rao",
                7_800.5,
                vec![
                    Touchpoint::new(1, "Email Campaign", "Open", 9, 15.0),
                    Touchpoint::new(2, "Webinar", "Engagement", 4, 0.0),
                    Touchpoint::new(3, "Email Campaign", "Click", 1, 10.0),
                    Touchpoint::new(4, "Referral", "Click", 0, 0.0),
                ],
            )
            .unwrap(),
            2,
        ),
        dated(
            Journey::new(
                "J4",
                "Rohan Ghosh",
                1_500.0,
                vec![
                    Touchpoint::new(1, DIRECT_TRAFFIC, "Visit", 3, 0.0),
                    Touchpoint::new(2, DIRECT_TRAFFIC, "Visit", 0, 0.0),
                ],
            )
            .unwrap(),
            4,
        ),
        Journey::new(
            "J5",
            "Meera Subramanian",
            2_750.25,
            vec![Touchpoint::new(1, "Google Ads", "Form Fill", 0, 80.0)],
        )
        .unwrap(),
    ]
}
