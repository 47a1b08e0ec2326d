//! Integration tests for cartesian rule generation.

use iptrule::{
    AddressPair, Error, ExplicitModuleFormatter, ImplicitFlagFormatter, JsonRegistrar,
    MatchTemplate, MemoryRegistrar, Result, RuleGenerator, RuleParams, RulesFile,
};
use std::io::Write;

/// Formatter standing in for an external one: renders addresses as `-s`/`-d`.
fn addresses(template: &MatchTemplate, is_ipv6: bool) -> Result<String> {
    let version = if is_ipv6 { "6" } else { "4" };
    let mut parts = Vec::new();
    if let Some(src) = template.get(&format!("source_v{}", version)) {
        parts.push(format!("-s {}", src));
    }
    if let Some(dst) = template.get(&format!("destination_v{}", version)) {
        parts.push(format!("-d {}", dst));
    }
    Ok(parts.join(" "))
}

fn nothing(_: &MatchTemplate, _: bool) -> Result<String> {
    Ok(String::new())
}

fn web_params() -> RuleParams {
    RuleParams {
        name: "web".to_string(),
        cartesian_product: Some(vec![AddressPair::new("10.0.0.1", "10.0.0.2")]),
        implicit_matches: Some(MatchTemplate::new()),
        explicit_matches: MatchTemplate::new(),
        ip_version: Some("4".to_string()),
        order: Some(100),
        ensure: Some("present".to_string()),
        table: Some("filter".to_string()),
        command: "iptables".to_string(),
        chain: "INPUT".to_string(),
        target: "ACCEPT".to_string(),
        rule: Some(String::new()),
        ..Default::default()
    }
}

#[test]
fn test_end_to_end_single_pair() {
    let generator = RuleGenerator::new(&addresses, &nothing);
    let mut registrar = MemoryRegistrar::new();

    let resources = generator
        .add_cartesian_rules(web_params(), &mut registrar)
        .unwrap();

    assert_eq!(resources.len(), 1);
    let rule = resources.iter().next().unwrap();
    assert_eq!(rule.content, "iptables INPUT -s 10.0.0.1 -d 10.0.0.2 -j ACCEPT\n");
    assert_eq!(rule.target, "/var/lib/puppet/iptables/tables/v4_filter");
    assert_eq!(rule.order, 100);
    assert_eq!(rule.ensure, "present");

    let hash = rule
        .identifier
        .strip_prefix("iptables_rule_v4_web-20-")
        .unwrap();
    assert_eq!(hash.len(), 40);
    assert_eq!(hash, iptrule::generator::content_hash(&rule.content));

    assert_eq!(registrar.calls(), 1);
    assert_eq!(registrar.last().unwrap().resource_type, "concat::fragment");
}

#[test]
fn test_deterministic_output() {
    let generator = RuleGenerator::new(&addresses, &nothing);
    let mut params = web_params();
    params.cartesian_product = Some(vec![
        AddressPair::new("10.0.0.1", "10.0.0.2"),
        AddressPair::new("10.0.0.3", ""),
        AddressPair::new("", "10.0.0.4"),
    ]);
    params
        .target_options
        .insert("log-prefix".to_string(), "web: ".to_string());

    let first = generator
        .add_cartesian_rules(params.clone(), &mut MemoryRegistrar::new())
        .unwrap();
    let second = generator
        .add_cartesian_rules(params, &mut MemoryRegistrar::new())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.identifiers().collect::<Vec<_>>(),
        second.identifiers().collect::<Vec<_>>()
    );
}

#[test]
fn test_required_field_rejection() {
    let generator = RuleGenerator::new(&addresses, &nothing);
    let clears: [(&str, fn(&mut RuleParams)); 6] = [
        ("cartesian product", |p| p.cartesian_product = None),
        ("implicit_matches", |p| p.implicit_matches = None),
        ("ip_version", |p| p.ip_version = None),
        ("order", |p| p.order = None),
        ("ensure", |p| p.ensure = None),
        ("table", |p| p.table = None),
    ];

    for (missing, clear) in clears {
        let mut params = web_params();
        clear(&mut params);
        let mut registrar = MemoryRegistrar::new();

        match generator.add_cartesian_rules(params, &mut registrar) {
            Err(Error::MissingParameter(name)) => assert_eq!(name, missing),
            other => panic!("expected missing {}, got {:?}", missing, other),
        }
        assert_eq!(registrar.calls(), 0);
    }
}

#[test]
fn test_raw_rule_bypass() {
    let generator = RuleGenerator::new(&addresses, &nothing);
    let mut params = web_params();
    params.rule = Some("-m state --state ESTABLISHED,RELATED".to_string());
    params
        .target_options
        .insert("reject-with".to_string(), "tcp-reset".to_string());

    let resources = generator
        .add_cartesian_rules(params, &mut MemoryRegistrar::new())
        .unwrap();
    assert_eq!(
        resources.iter().next().unwrap().content,
        "iptables INPUT -m state --state ESTABLISHED,RELATED -j ACCEPT\n"
    );
}

#[test]
fn test_registrar_failure_surfaces() {
    let generator = RuleGenerator::new(&addresses, &nothing);
    let mut calls = 0;
    let mut failing = |_: &str, _: &iptrule::RuleResources| -> Result<()> {
        calls += 1;
        Err(Error::Registrar("store unavailable".to_string()))
    };

    let err = generator
        .add_cartesian_rules(web_params(), &mut failing)
        .unwrap_err();
    assert!(matches!(err, Error::Registrar(_)));
    assert_eq!(calls, 1);
}

#[test]
fn test_ipv6_with_default_formatters() {
    let implicit = ImplicitFlagFormatter::new();
    let explicit = ExplicitModuleFormatter::new();
    let generator = RuleGenerator::new(&implicit, &explicit);

    let params = RuleParams {
        name: "dns".to_string(),
        cartesian_product: Some(vec![
            AddressPair::new("2001:db8::1", ""),
            AddressPair::new("2001:db8::2", ""),
        ]),
        implicit_matches: Some([("protocol".to_string(), "udp".to_string())].into()),
        explicit_matches: [("udp".to_string(), "--dport 53".to_string())].into(),
        ip_version: Some("6".to_string()),
        order: Some(300),
        ensure: Some("present".to_string()),
        table: Some("filter".to_string()),
        command: "-A".to_string(),
        chain: "OUTPUT".to_string(),
        target: "ACCEPT".to_string(),
        ..Default::default()
    };

    let resources = generator
        .add_cartesian_rules(params, &mut MemoryRegistrar::new())
        .unwrap();

    let contents: Vec<&str> = resources.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "-A OUTPUT -s 2001:db8::1 -p udp -m udp --dport 53 -j ACCEPT\n",
            "-A OUTPUT -s 2001:db8::2 -p udp -m udp --dport 53 -j ACCEPT\n",
        ]
    );
    assert!(resources
        .iter()
        .all(|r| r.identifier.starts_with("iptables_rule_v6_dns-20-")
            && r.target == "/var/lib/puppet/iptables/tables/v6_filter"));
}

#[test]
fn test_yaml_file_to_json_batches() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(
        input,
        r#"
- name: ssh
  cartesian_product:
    - ["10.0.0.0/8", ""]
    - ["192.168.0.0/16", ""]
  implicit_matches:
    protocol: tcp
  explicit_matches:
    tcp: "--dport 22"
  ip_version: 4
  order: 100
  ensure: present
  table: filter
  command: -A
  chain: INPUT
  target: ACCEPT
- name: log
  cartesian_product: [["", ""]]
  implicit_matches: {{}}
  ip_version: 4
  order: 900
  ensure: present
  table: filter
  command: -A
  chain: INPUT
  target: LOG
  target_options:
    log-prefix: "drop: "
    log-level_v4: 4
    log-level_v6: 6
"#
    )
    .unwrap();

    let content = std::fs::read_to_string(input.path()).unwrap();
    let specs: Vec<RuleParams> = serde_yaml::from_str(&content).unwrap();

    let implicit = ImplicitFlagFormatter::new();
    let explicit = ExplicitModuleFormatter::new();
    let generator = RuleGenerator::new(&implicit, &explicit);

    let output = tempfile::NamedTempFile::new().unwrap();
    let mut registrar = JsonRegistrar::new(output.reopen().unwrap());
    for params in specs {
        generator.add_cartesian_rules(params, &mut registrar).unwrap();
    }
    drop(registrar);

    let written = std::fs::read_to_string(output.path()).unwrap();
    let batches: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&written)
        .into_iter::<serde_json::Value>()
        .collect::<std::result::Result<_, _>>()
        .unwrap();

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0]["resources"].as_object().unwrap().len(), 2);

    let log_rules = batches[1]["resources"].as_object().unwrap();
    assert_eq!(log_rules.len(), 1);
    let (id, rule) = log_rules.iter().next().unwrap();
    assert!(id.starts_with("iptables_rule_v4_log-20-"));
    assert_eq!(
        rule["content"],
        "-A INPUT -j LOG --log-level \"4\" --log-prefix \"drop: \"\n"
    );
    assert_eq!(rule["order"], 900);
}

#[test]
fn test_rules_document_with_config_override() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(
        input,
        r#"
config:
  tables_dir: /etc/firewall/tables
  resource_type: file_fragment
rules:
  - name: icmp
    cartesian_product: [["", ""]]
    implicit_matches:
      protocol: icmp
    ip_version: 4
    order: 50
    ensure: present
    table: filter
    command: -A
    chain: INPUT
    target: ACCEPT
"#
    )
    .unwrap();

    let file = RulesFile::load(input.path()).unwrap();
    let implicit = ImplicitFlagFormatter::new();
    let explicit = ExplicitModuleFormatter::new();
    let generator = RuleGenerator::with_config(&implicit, &explicit, file.config.clone());

    let summaries = file.check(&generator).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].rules, 1);

    let mut registrar = JsonRegistrar::new(Vec::new());
    for params in file.rules {
        generator.add_cartesian_rules(params, &mut registrar).unwrap();
    }

    let value: serde_json::Value =
        serde_json::from_slice(&registrar.into_inner()).unwrap();
    assert_eq!(value["type"], "file_fragment");
    let (_, rule) = value["resources"].as_object().unwrap().iter().next().unwrap();
    assert_eq!(rule["target"], "/etc/firewall/tables/v4_filter");
    assert_eq!(rule["content"], "-A INPUT -p icmp -j ACCEPT\n");
}
