use domain::{ABSENT_REF, DomainError, Role, parse_id, parse_optional_ref};
use uuid::Uuid;

#[test]
fn parse_id_rejects_malformed() {
    let err = parse_id("not-a-uuid", "nodeId").expect_err("malformed");
    assert_eq!(
        err,
        DomainError::InvalidArgument("nodeId is not a valid uuid".to_string())
    );
}

#[test]
fn optional_ref_treats_blank_and_sentinel_as_absent() {
    assert_eq!(parse_optional_ref(None, "workspace").expect("none"), None);
    assert_eq!(parse_optional_ref(Some(""), "workspace").expect("blank"), None);
    assert_eq!(
        parse_optional_ref(Some(ABSENT_REF), "workspace").expect("sentinel"),
        None
    );
}

#[test]
fn optional_ref_parses_valid_and_rejects_malformed() {
    let id = Uuid::new_v4();
    let parsed = parse_optional_ref(Some(&id.to_string()), "workspace").expect("valid");
    assert_eq!(parsed, Some(id));

    let err = parse_optional_ref(Some("abc"), "workspace").expect_err("malformed");
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn role_parsing_is_exact() {
    assert_eq!("admin".parse::<Role>().expect("admin"), Role::Admin);
    assert_eq!("user".parse::<Role>().expect("user"), Role::User);
    assert!("Admin".parse::<Role>().is_err());
    assert!("root".parse::<Role>().is_err());
}
