use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E6002.as_str(), "E6002");
}

#[test]
fn test_phase_predicates() {
    assert!(ErrorCode::E0002.is_lexer_error());
    assert!(ErrorCode::E1003.is_parser_error());
    assert!(ErrorCode::E3009.is_compile_error());
    assert!(ErrorCode::E5002.is_link_error());
    assert!(ErrorCode::E6013.is_runtime_error());

    assert!(!ErrorCode::E6001.is_compile_error());
    assert!(!ErrorCode::E3001.is_runtime_error());
}

#[test]
fn test_from_str_round_trip() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e6003".parse::<ErrorCode>(), Ok(ErrorCode::E6003));
    assert!("E4242".parse::<ErrorCode>().is_err());
}

#[test]
fn test_every_code_has_description() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
