#[cfg(test)]
mod tests {
    use crate::cmd::helpers::CategoryArg;
    use crate::cmd::Commands;
    use crate::Opts;
    use clap::Parser;
    use rulesync_common::RuleCategory;

    fn parse(args: &[&str]) -> Opts {
        let mut full = vec!["rulesync"];
        full.extend_from_slice(args);
        Opts::parse_from(full)
    }

    fn try_parse(args: &[&str]) -> Result<Opts, clap::Error> {
        let mut full = vec!["rulesync"];
        full.extend_from_slice(args);
        Opts::try_parse_from(full)
    }

    #[test]
    fn parse_version() {
        let opts = parse(&["version"]);
        assert!(matches!(opts.cmd, Commands::Version));
    }

    #[test]
    fn parse_json_flag() {
        let opts = parse(&["--json", "version"]);
        assert!(opts.json);
        assert_eq!(opts.output_mode(), crate::output::OutputMode::Json);
    }

    #[test]
    fn parse_human_flag_default() {
        let opts = parse(&["version"]);
        assert!(!opts.json);
        assert_eq!(opts.output_mode(), crate::output::OutputMode::Human);
    }

    #[test]
    fn parse_server_flag() {
        let opts = parse(&["--server", "10.0.0.2:8848", "version"]);
        assert_eq!(opts.server.as_deref(), Some("10.0.0.2:8848"));
    }

    #[test]
    fn parse_config_flag() {
        let opts = parse(&["--config", "/tmp/rulesync.yml", "version"]);
        assert_eq!(opts.config.as_deref(), Some("/tmp/rulesync.yml"));
    }

    #[test]
    fn parse_keys() {
        let opts = parse(&["keys", "--app", "order-svc"]);
        assert!(matches!(opts.cmd, Commands::Keys(_)));
    }

    #[test]
    fn parse_fetch_with_defaults() {
        let opts = parse(&["fetch", "gateway-flow", "--app", "order-svc"]);
        assert!(matches!(opts.cmd, Commands::Fetch(_)));
    }

    #[test]
    fn parse_publish() {
        let opts = parse(&[
            "publish", "authority", "--app", "order-svc", "--ip", "10.0.0.7", "--port", "8720",
            "--data", "[]", "--yes",
        ]);
        assert!(matches!(opts.cmd, Commands::Publish(_)));
    }

    #[test]
    fn publish_requires_data() {
        assert!(try_parse(&["publish", "flow", "--app", "order-svc"]).is_err());
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(try_parse(&["fetch", "cluster", "--app", "order-svc"]).is_err());
    }

    #[test]
    fn port_must_fit_u16() {
        assert!(try_parse(&["fetch", "flow", "--app", "a", "--port", "70000"]).is_err());
    }

    #[test]
    fn parse_config_subcommands() {
        assert!(matches!(parse(&["config", "show"]).cmd, Commands::Config(_)));
        assert!(matches!(parse(&["config", "path"]).cmd, Commands::Config(_)));
    }

    #[test]
    fn category_args_map_onto_store_categories() {
        assert_eq!(RuleCategory::from(CategoryArg::Param), RuleCategory::HotspotParam);
        assert_eq!(RuleCategory::from(CategoryArg::GatewayApi), RuleCategory::GatewayApiGroup);
        assert_eq!(RuleCategory::from(CategoryArg::GatewayFlow), RuleCategory::GatewayFlow);
    }
}
