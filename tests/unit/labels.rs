use vazifeban::validation::{comment::validate_comment_content, label::normalize_label_name};

#[test]
fn label_names_are_trimmed_before_storage() {
    assert_eq!(normalize_label_name("  backend ").unwrap(), "backend");
    let err = normalize_label_name("\t ").unwrap_err();
    assert_eq!(err.field_name(), Some("name"));
}

#[test]
fn blank_comments_are_rejected() {
    assert!(validate_comment_content("Looks good to me").is_ok());
    assert!(validate_comment_content("   ").is_err());
}
