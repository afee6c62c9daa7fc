//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, QueryArgs};
use crate::config::{load_config, FetcherConfig};
use crate::error::{Error, Result, ResultExt};
use crate::query::{PageParams, ParameterSet, QueryParams};
use crate::types::JsonValue;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{}", self.render(&output)?);
        Ok(())
    }

    /// Run the command and return its JSON output
    pub async fn execute(&self) -> Result<JsonValue> {
        let config = self.effective_config()?;
        debug!("Using base URL {}", config.base_url);
        let fetcher = config.build_fetcher()?;

        match &self.cli.command {
            Commands::Get { endpoint, query } => {
                let params = build_query(query)?;
                fetcher.get_page(endpoint, &params).await
            }
            Commands::Link { link } => fetcher.page_from_link(link).await,
            Commands::All {
                endpoint,
                query,
                max_pages,
            } => {
                let params = build_query(query)?;
                let records: Vec<JsonValue> =
                    fetcher.collect_all(endpoint, &params, *max_pages).await?;
                Ok(JsonValue::Array(records))
            }
        }
    }

    /// Config file, then environment, then command-line flags
    fn effective_config(&self) -> Result<FetcherConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => FetcherConfig::default(),
        };
        config.apply_env()?;
        self.apply_flags(&mut config)?;
        Ok(config)
    }

    fn apply_flags(&self, config: &mut FetcherConfig) -> Result<()> {
        if let Some(ref base_url) = self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_secs = timeout;
        }
        for raw in &self.cli.headers {
            let (name, value) = split_pair(raw, ':', "--header")?;
            config.headers.insert(name, value);
        }
        Ok(())
    }

    fn render(&self, output: &JsonValue) -> Result<String> {
        let rendered = if self.cli.pretty {
            serde_json::to_string_pretty(output)
        } else {
            serde_json::to_string(output)
        };
        rendered.context("Failed to render output")
    }
}

/// Typed paging params first, then raw `--param` pairs
fn build_query(args: &QueryArgs) -> Result<ParameterSet> {
    let mut page = PageParams {
        limit: args.limit,
        number: args.number,
        cursor: args.cursor.clone(),
        order: args.order.map(Into::into),
        includes: args.includes.clone(),
        ..PageParams::default()
    };
    for raw in &args.filters {
        let (name, value) = split_pair(raw, '=', "--filter")?;
        page.filters.insert(name, value);
    }

    let mut params = page.prepare();
    for raw in &args.params {
        let (key, value) = split_pair(raw, '=', "--param")?;
        params.append(key, value);
    }
    Ok(params)
}

/// Split `raw` at the first `sep`, trimming both sides
fn split_pair(raw: &str, sep: char, flag: &str) -> Result<(String, String)> {
    match raw.split_once(sep) {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(Error::InvalidConfigValue {
            field: flag.to_string(),
            message: format!("expected NAME{sep}VALUE, got '{raw}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pagefetch").chain(args.iter().copied()))
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(
            split_pair("state=active", '=', "--filter").unwrap(),
            ("state".to_string(), "active".to_string())
        );
        assert_eq!(
            split_pair("a=b=c", '=', "--param").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert_eq!(
            split_pair("Accept: text/json", ':', "--header").unwrap(),
            ("Accept".to_string(), "text/json".to_string())
        );
        assert!(split_pair("novalue", '=', "--param").is_err());
        assert!(split_pair("=x", '=', "--param").is_err());
    }

    #[test]
    fn test_build_query() {
        let cli = parse(&[
            "get",
            "/assets",
            "--limit",
            "5",
            "--order",
            "desc",
            "--filter",
            "state=active",
            "--include",
            "owner",
            "--param",
            "extra=1",
        ]);
        let Commands::Get { query, .. } = cli.command else {
            panic!("Expected get");
        };

        let params = build_query(&query).unwrap();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("page[limit]", "5"),
                ("page[order]", "desc"),
                ("filter[state]", "active"),
                ("include", "owner"),
                ("extra", "1"),
            ]
        );
    }

    #[test]
    fn test_build_query_rejects_bad_filter() {
        let query = QueryArgs {
            filters: vec!["oops".to_string()],
            ..QueryArgs::default()
        };
        let err = build_query(&query).unwrap_err();
        assert!(err.to_string().contains("--filter"));
    }

    #[test]
    fn test_flags_override_config() {
        let runner = Runner::new(parse(&[
            "--base-url",
            "https://flag.example.com",
            "--timeout",
            "9",
            "-H",
            "X-Key: abc",
            "link",
            "/next",
        ]));
        let mut config = FetcherConfig::new("https://file.example.com");
        runner.apply_flags(&mut config).unwrap();

        assert_eq!(config.base_url, "https://flag.example.com");
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.headers.get("X-Key"), Some(&"abc".to_string()));
    }

    #[tokio::test]
    async fn test_execute_get() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/assets"))
            .and(query_param("page[limit]", "2"))
            .and(header("X-Key", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "1"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = format!("{}/v3", mock_server.uri());
        let runner = Runner::new(parse(&[
            "-b", base.as_str(), "-H", "X-Key: abc", "get", "assets", "--limit", "2",
        ]));

        let output = runner.execute().await.unwrap();
        assert_eq!(output, json!({"data": [{"id": "1"}]}));
    }

    #[tokio::test]
    async fn test_execute_all() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("page[cursor]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "b"}],
                "links": {}
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("page[limit]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "a"}],
                "links": {"next": "/items?page[cursor]=2"}
            })))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let runner = Runner::new(parse(&["-b", uri.as_str(), "all", "/items", "--limit", "1"]));

        let output = runner.execute().await.unwrap();
        assert_eq!(output, json!([{"id": "a"}, {"id": "b"}]));
    }

    #[test]
    fn test_render() {
        let compact = Runner::new(parse(&["link", "/x"]));
        assert_eq!(compact.render(&json!({"a": 1})).unwrap(), r#"{"a":1}"#);

        let pretty = Runner::new(parse(&["--pretty", "link", "/x"]));
        assert_eq!(pretty.render(&json!({"a": 1})).unwrap(), "{\n  \"a\": 1\n}");
    }
}
