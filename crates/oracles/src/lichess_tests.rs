use super::lichess::*;
use charisma::ServiceError;

fn cloud(json: &str) -> CloudEval {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_reads_principal_line() {
    let eval = cloud(
        r#"{"fen":"x","knodes":1200,"depth":40,
            "pvs":[{"moves":"e7e5 g1f3 b8c6","cp":-23},{"moves":"c7c5","cp":-30}]}"#,
    );
    assert_eq!(score_of(&eval), Ok(-23));
    assert_eq!(first_move_of(&eval).as_deref(), Ok("e7e5"));
}

#[test]
fn test_mate_line_scores_level() {
    let eval = cloud(r#"{"pvs":[{"moves":"d8h4","mate":1}]}"#);
    assert_eq!(score_of(&eval), Ok(0));
    assert_eq!(first_move_of(&eval).as_deref(), Ok("d8h4"));
}

#[test]
fn test_empty_answers() {
    let eval = cloud(r#"{"error":"Not found"}"#);
    assert_eq!(score_of(&eval), Err(ServiceError::Empty));
    assert_eq!(first_move_of(&eval), Err(ServiceError::Empty));

    let eval = cloud(r#"{"pvs":[{"cp":12,"moves":""}]}"#);
    assert_eq!(first_move_of(&eval), Err(ServiceError::Empty));
}

#[test]
fn test_bad_endpoint_is_rejected() {
    let built = LichessCloud::new("not a url", std::time::Duration::from_millis(10));
    assert!(matches!(built, Err(ServiceError::Malformed(_))));
}
