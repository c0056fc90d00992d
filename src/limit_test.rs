use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// SpeedCategory
// =============================================================

#[test]
fn category_rejects_out_of_range() {
    assert!(SpeedCategory::new(12).is_ok());
    assert!(matches!(SpeedCategory::new(13), Err(TrayError::InvalidConfiguration(_))));
}

#[test]
fn tens_of_kmh_convert_to_mps() {
    let c = SpeedCategory::new(12).unwrap();
    assert!(approx_eq(c.kmh(), 120.0));
    assert!(approx_eq(c.value_mps(), 120.0 / 3.6));
}

#[test]
fn no_limit_uses_high_stand_in() {
    let c = SpeedCategory::NO_LIMIT;
    assert!(c.is_unlimited());
    assert!(approx_eq(c.value_mps(), 200.0 / 3.6));
}

#[test]
fn initial_pattern_cycles_every_six() {
    let got: Vec<u8> = (0..8).map(|i| SpeedCategory::initial_for(i).index()).collect();
    assert_eq!(got, vec![6, 8, 10, 0, 12, 0, 6, 8]);
}

#[test]
fn all_lists_thirteen_categories() {
    let all: Vec<SpeedCategory> = SpeedCategory::all().collect();
    assert_eq!(all.len(), 13);
    assert_eq!(all[0], SpeedCategory::NO_LIMIT);
}

#[test]
fn display_names() {
    assert_eq!(SpeedCategory::NO_LIMIT.to_string(), "no limit");
    assert_eq!(SpeedCategory::initial_for(0).to_string(), "60 km/h");
}

#[test]
fn asset_file_follows_naming() {
    assert_eq!(SpeedCategory::initial_for(1).asset_file(), "figs/Tempo80svg.svg");
    assert_eq!(SpeedCategory::NO_LIMIT.asset_file(), "figs/Tempo00svg.svg");
}

#[test]
fn serde_uses_plain_index() {
    let c = SpeedCategory::initial_for(2);
    assert_eq!(serde_json::to_string(&c).unwrap(), "10");
    let back: SpeedCategory = serde_json::from_str("10").unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_str::<SpeedCategory>("42").is_err());
}

// =============================================================
// AssetRepo
// =============================================================

#[test]
fn repo_has_one_image_per_category() {
    let repo = AssetRepo::from_fn(SpeedCategory::asset_file);
    assert_eq!(repo.len(), 13);
    let key = SpeedCategory::initial_for(4).asset_key();
    assert_eq!(repo.get(key).map(String::as_str), Some("figs/Tempo120svg.svg"));
}

#[test]
fn tokens_of_same_category_share_key() {
    assert_eq!(SpeedCategory::initial_for(3).asset_key(), SpeedCategory::initial_for(5).asset_key());
}

#[test]
fn empty_repo_misses() {
    let repo: AssetRepo<String> = AssetRepo { images: Vec::new() };
    assert!(repo.is_empty());
    assert!(repo.get(SpeedCategory::NO_LIMIT.asset_key()).is_none());
}
