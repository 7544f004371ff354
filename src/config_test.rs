use super::*;

fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
}

#[test]
fn defaults_when_unset() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServerConfig { host: DEFAULT_HOST.to_owned(), port: DEFAULT_PORT });
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn reads_port_and_host() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 "), ("HOST", "127.0.0.1")])).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn rejects_non_numeric_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort { var: "PORT", value: "http".to_owned() });
}

#[test]
fn rejects_out_of_range_port() {
    assert!(matches!(
        ServerConfig::from_lookup(lookup(&[("PORT", "70000")])),
        Err(ConfigError::InvalidPort { .. })
    ));
}

#[test]
fn rejects_blank_host() {
    let err = ServerConfig::from_lookup(lookup(&[("HOST", "  ")])).unwrap_err();
    assert_eq!(err, ConfigError::Empty { var: "HOST" });
    assert_eq!(err.to_string(), "invalid HOST: must not be empty");
}
