use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E2004.to_string(), "E2004");
    assert_eq!(ErrorCode::E2026.as_str(), "E2026");
}

#[test]
fn test_error_code_from_str() {
    assert_eq!("E2021".parse::<ErrorCode>(), Ok(ErrorCode::E2021));
    assert_eq!("e2027".parse::<ErrorCode>(), Ok(ErrorCode::E2027));
    assert!("E9999".parse::<ErrorCode>().is_err());
}

#[test]
fn test_all_codes_round_trip_and_classify() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        // Every code has a category; exercise the match.
        let _ = code.category();
    }
}

#[test]
fn test_categories() {
    assert_eq!(ErrorCode::E2004.category(), ErrorCategory::Shape);
    assert_eq!(ErrorCode::E2022.category(), ErrorCategory::Shape);
    assert_eq!(ErrorCode::E2020.category(), ErrorCategory::Kind);
    assert_eq!(ErrorCode::E2026.category(), ErrorCategory::Lookup);
    assert_eq!(ErrorCode::E2001.category(), ErrorCategory::Delegated);
}
