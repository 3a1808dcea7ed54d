use ipl_dashboard::colors::{ColorMap, HexColor, color_of};
use ipl_dashboard::dataset::{Dataset, TeamRecord};
use ipl_dashboard::error::ConfigurationError;

#[test]
fn seed_colors_cover_seed_dataset() {
    let dataset = Dataset::ipl();
    let colors = ColorMap::ipl();
    assert!(colors.validate_coverage(&dataset).is_ok());
    assert_eq!(colors.domain(), dataset.team_names());
}

#[test]
fn color_lookup_is_stable() {
    let colors = ColorMap::ipl();
    let first = color_of("Chennai Super Kings", &colors).unwrap();
    for _ in 0..5 {
        assert_eq!(color_of("Chennai Super Kings", &colors).unwrap(), first);
    }
    assert_eq!(first.to_string(), "#F9CD05");
}

#[test]
fn missing_color_is_a_configuration_error() {
    let colors = ColorMap::ipl();
    let err = color_of("Deccan Chargers", &colors).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::MissingColor {
            team: "Deccan Chargers".to_string()
        }
    );
    assert!(err.to_string().contains("Deccan Chargers"));
}

#[test]
fn coverage_check_names_first_uncovered_team() {
    let dataset = Dataset::new(vec![
        TeamRecord::new("Mumbai Indians", 285, 158, 122, 6),
        TeamRecord::new("Deccan Chargers", 75, 29, 46, 1),
        TeamRecord::new("Kochi Tuskers Kerala", 14, 6, 8, 0),
    ])
    .unwrap();
    let err = ColorMap::ipl().validate_coverage(&dataset).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::MissingColor {
            team: "Deccan Chargers".to_string()
        }
    );
}

#[test]
fn from_hex_parses_and_rejects() {
    let colors = ColorMap::from_hex([("A", "#004BA0"), ("B", "#f26522")]).unwrap();
    assert_eq!(colors.get("A"), Some(HexColor::from_rgb(0x00, 0x4B, 0xA0)));
    assert_eq!(colors.range(), vec!["#004BA0".to_string(), "#F26522".to_string()]);

    let err = ColorMap::from_hex([("A", "blue")]).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidColor { .. }));
}
