use super::*;

#[test]
fn empty_file_uses_defaults() {
    let config: FragmentsConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 5 * 1024 * 1024);
    assert_eq!(config.server.public_url(), "http://localhost:8080");
    assert_eq!(config.metadata.backend, MetadataBackend::Memory);
    assert_eq!(config.data.backend, DataBackend::Memory);
    assert_eq!(config.data.s3.region, "us-east-1");
    assert!(config.auth.enabled);
    assert!(config.auth.users.is_empty());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[test]
fn full_config() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000
        external_url = "https://fragments.example.com/"
        max_body_bytes = 1024

        [metadata]
        backend = "memory"

        [data]
        backend = "s3"

        [data.s3]
        region = "ca-central-1"
        bucket = "fragments-data"
        prefix = "prod/"
        endpoint_url = "http://localhost:4566"
        force_path_style = true

        [auth]
        enabled = true

        [[auth.users]]
        email = "user1@email.com"
        password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"

        [logging]
        level = "debug"
        format = "json"
    "#;

    let config: FragmentsConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.max_body_bytes, 1024);
    assert_eq!(config.server.public_url(), "https://fragments.example.com");
    assert_eq!(config.data.backend, DataBackend::S3);
    assert_eq!(config.data.s3.bucket.as_deref(), Some("fragments-data"));
    assert_eq!(config.data.s3.prefix.as_deref(), Some("prod/"));
    assert!(config.data.s3.force_path_style);
    assert_eq!(config.auth.users.len(), 1);
    assert_eq!(config.auth.users[0].email, "user1@email.com");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn auth_can_be_disabled() {
    let config: FragmentsConfig = toml::from_str("[auth]\nenabled = false\n").unwrap();
    assert!(!config.auth.enabled);
}

#[test]
fn unknown_backend_is_rejected() {
    let result: Result<FragmentsConfig, _> = toml::from_str("[data]\nbackend = \"gcs\"\n");
    assert!(result.is_err());
}
