use validator::Validate;
use vazifeban::{db::models::CreateTeamRequest, services::TeamsService};

#[test]
fn team_names_must_not_be_blank() {
    assert!(TeamsService::validate_name("Mobile").is_ok());
    assert!(TeamsService::validate_name("").is_err());
    assert_eq!(
        TeamsService::validate_name("   ").unwrap_err().field_name(),
        Some("name")
    );
}

#[test]
fn create_team_request_enforces_length() {
    let ok = CreateTeamRequest {
        name: "Mobile".to_string(),
        description: String::new(),
    };
    assert!(ok.validate().is_ok());

    let too_long = CreateTeamRequest {
        name: "x".repeat(256),
        description: String::new(),
    };
    assert!(too_long.validate().is_err());
}
