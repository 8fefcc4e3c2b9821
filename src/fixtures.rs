#[cfg(test)]
pub mod test {
    use crate::config::Config;
    use crate::value::Value;

    /// `{a: {b: 1, c: 2}, d: 3}`
    pub fn abcd() -> Config {
        let mut a = Config::new();
        a.insert("b", 1);
        a.insert("c", 2);

        let mut root = Config::new();
        root.insert("a", a);
        root.insert("d", 3);
        root
    }

    /// A small service config three levels deep.
    pub fn server() -> Config {
        let mut http = Config::new();
        http.insert("port", 8080);
        http.insert("tls", false);

        let mut server = Config::new();
        server.insert("host", "localhost");
        server.insert("http", http);
        server.insert("workers", 4);

        let mut root = Config::new();
        root.insert("name", "demo");
        root.insert("server", server);
        root.insert("debug", false);
        root
    }

    /// Decode a JSON object verbatim, without expanding dotted keys.
    pub fn json(text: &str) -> Config {
        let decoded: serde_json::Value = serde_json::from_str(text).unwrap();
        match Value::from(decoded) {
            Value::Node(node) => node,
            other => panic!("fixture is not an object: {other:?}"),
        }
    }

    #[test]
    fn server_fixture_shape() {
        let config = server();
        assert_eq!(config.get("server.http.port").unwrap().as_i64(), Some(8080));
        assert_eq!(config.get("name").unwrap().as_str(), Some("demo"));
    }
}
