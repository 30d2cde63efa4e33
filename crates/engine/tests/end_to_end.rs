//! End-to-end attribution scenarios through the public service API.

use attribution_core::config::AnalyticsConfig;
use attribution_core::types::{Journey, Touchpoint, DIRECT_TRAFFIC};
use attribution_core::{AttributionError, AttributionModel};
use attribution_engine::{AttributionService, FileJourneyStore, InMemoryJourneyStore};

fn j1() -> Journey {
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

fn service_for(journeys: Vec<Journey>) -> AttributionService {
    AttributionService::from_store(
        &InMemoryJourneyStore::new(journeys),
        AnalyticsConfig::default(),
    )
    .unwrap()
}

fn revenue_of(service: &AttributionService, model: &str, channel: &str) -> f64 {
    service
        .get_attribution(model)
        .unwrap()
        .into_iter()
        .find(|r| r.channel == channel)
        .map(|r| r.attributed_revenue)
        .unwrap()
}

#[test]
fn test_j1_across_models() {
    let service = service_for(vec![j1()]);

    assert_eq!(revenue_of(&service, "first-touch", "Google Ads"), 10_000.0);
    assert_eq!(revenue_of(&service, "first-touch", "Email Campaign"), 0.0);
    assert_eq!(revenue_of(&service, "first-touch", DIRECT_TRAFFIC), 0.0);

    assert_eq!(revenue_of(&service, "last-touch", DIRECT_TRAFFIC), 10_000.0);
    assert_eq!(revenue_of(&service, "last-non-direct", "Email Campaign"), 10_000.0);

    for channel in ["Google Ads", "Email Campaign", DIRECT_TRAFFIC] {
        assert_eq!(revenue_of(&service, "linear", channel), 3333.33);
    }

    assert_eq!(revenue_of(&service, "u-shaped", "Google Ads"), 4000.0);
    assert_eq!(revenue_of(&service, "u-shaped", DIRECT_TRAFFIC), 4000.0);
    assert_eq!(revenue_of(&service, "u-shaped", "Email Campaign"), 2000.0);

    assert_eq!(revenue_of(&service, "w-shaped", "Email Campaign"), 3000.0);
}

#[test]
fn test_every_model_distributes_full_value() {
    let service = service_for(vec![j1()]);
    for comparison in service.compare_models() {
        let total: f64 = comparison.channels.iter().map(|r| r.attributed_revenue).sum();
        assert!((total - 10_000.0).abs() < 0.02, "{}: {total}", comparison.model);
        let pct: f64 = comparison
            .channels
            .iter()
            .map(|r| r.attribution_percentage)
            .sum();
        assert!((99.9..=100.1).contains(&pct));
    }
}

#[test]
fn test_all_direct_journey_is_credited_under_last_non_direct() {
    let all_direct = Journey::new(
        "J2",
        "Rohan Ghosh",
        1_500.0,
        vec![
            Touchpoint::new(1, DIRECT_TRAFFIC, "Visit", 2, 0.0),
            Touchpoint::new(2, DIRECT_TRAFFIC, "Visit", 0, 0.0),
        ],
    )
    .unwrap();
    let service = service_for(vec![all_direct]);
    assert_eq!(revenue_of(&service, "last-non-direct", DIRECT_TRAFFIC), 1_500.0);
}

#[test]
fn test_empty_dataset_returns_zero_results() {
    let service = service_for(Vec::new());

    let summary = service.get_summary();
    assert_eq!(summary.total_conversions, 0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.overall_roas, 0.0);

    for model in AttributionModel::ALL {
        assert!(service.get_attribution(model.id()).unwrap().is_empty());
    }
    assert!(matches!(
        service.require_data(),
        Err(AttributionError::EmptyDataset)
    ));
}

#[test]
fn test_file_backed_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journeys.json");
    std::fs::write(
        &path,
        r#"{
            "journeys": [
                {
                    "journey_id": "J001",
                    "customer_name": "Ananya Patel",
                    "conversion_value": 4000.0,
                    "conversion_date": "2024-05-10T08:30:00Z",
                    "touchpoint_count": 2,
                    "time_to_conversion": 7,
                    "touchpoints": [
                        {"sequence": 1, "channel": "LinkedIn", "interaction_type": "Click", "days_before_conversion": 7, "cost": 400.0},
                        {"sequence": 2, "channel": "Webinar", "interaction_type": "Engagement", "days_before_conversion": 0, "cost": 0.0}
                    ]
                }
            ],
            "non_converting_exposures": {"LinkedIn": 3, "Instagram": 10}
        }"#,
    )
    .unwrap();

    let store = FileJourneyStore::open(&path).unwrap();
    let service = AttributionService::from_store(&store, AnalyticsConfig::default()).unwrap();

    // 2^0 : 2^-1 → 2/3 to Webinar, 1/3 to LinkedIn.
    assert_eq!(revenue_of(&service, "time-decay", "Webinar"), 2666.67);
    assert_eq!(revenue_of(&service, "time-decay", "LinkedIn"), 1333.33);

    let metrics = service.get_advanced_metrics();
    let linkedin = metrics.iter().find(|m| m.channel == "LinkedIn").unwrap();
    assert_eq!(linkedin.conversion_rate, 25.0);
    assert_eq!(linkedin.cpa, Some(400.0));
    let instagram = metrics.iter().find(|m| m.channel == "Instagram").unwrap();
    assert_eq!(instagram.cpa, None);

    let trends = service.get_revenue_trends();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].roas, 10.0);

    assert_eq!(service.get_journey("J001").unwrap().customer_name, "Ananya Patel");
}
