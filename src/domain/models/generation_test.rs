use super::QualityLevel;

#[test]
fn it_parses_quality_levels() {
    assert_eq!(
        QualityLevel::parse("fast".to_string()),
        Some(QualityLevel::Fast)
    );
    assert_eq!(
        QualityLevel::parse("standard".to_string()),
        Some(QualityLevel::Standard)
    );
    assert_eq!(
        QualityLevel::parse("high".to_string()),
        Some(QualityLevel::High)
    );
    assert_eq!(QualityLevel::parse("ultra".to_string()), None);
}

#[test]
fn it_defaults_to_standard() {
    assert_eq!(QualityLevel::default(), QualityLevel::Standard);
    assert_eq!(QualityLevel::default().to_string(), "standard");
}
