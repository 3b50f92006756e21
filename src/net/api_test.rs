use super::*;

fn backend(base_url: &str) -> BackendConfig {
    BackendConfig { base_url: base_url.to_owned(), api_key: "anon".to_owned(), table: "enrollments".to_owned() }
}

#[test]
fn table_endpoint_formats_rest_path() {
    assert_eq!(
        table_endpoint("https://project.example.co", "enrollments"),
        "https://project.example.co/rest/v1/enrollments"
    );
}

#[test]
fn table_endpoint_tolerates_trailing_slash() {
    assert_eq!(table_endpoint("https://project.example.co/", "leads"), "https://project.example.co/rest/v1/leads");
}

#[test]
fn rest_table_uses_configured_table() {
    let table = RestTable::new(&backend("https://project.example.co"));
    assert_eq!(table.endpoint(), "https://project.example.co/rest/v1/enrollments");
}

#[test]
fn bearer_wraps_key() {
    assert_eq!(bearer("anon"), "Bearer anon");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn native_insert_is_unavailable() {
    let table = RestTable::new(&backend("https://project.example.co"));
    let record = EnrollmentRecord {
        full_name: "A".to_owned(),
        email: "a@example.com".to_owned(),
        path_preference: "data".to_owned(),
    };
    let result = futures::executor::block_on(table.insert(&record));
    assert!(matches!(result, Err(EnrollError::Unavailable)));
}
