//! End-to-end override resolution behavior

use std::path::Path;

use fmtrc::{
    FilePatterns, FormatterConfig, OptionOrigin, OptionsPatch, OverrideRule, Resolver,
    TrailingComma,
};

fn config_with(overrides: Vec<OverrideRule>) -> FormatterConfig {
    FormatterConfig {
        base: OptionsPatch {
            print_width: Some(80),
            tab_width: Some(4),
            single_quote: Some(true),
            ..Default::default()
        },
        overrides,
    }
}

fn rule(files: FilePatterns, options: OptionsPatch) -> OverrideRule {
    OverrideRule { files, options }
}

#[test]
fn test_last_matching_rule_wins_over_earlier_and_base() {
    let config = config_with(vec![
        rule(
            FilePatterns::One("*.md".to_string()),
            OptionsPatch {
                print_width: Some(100),
                ..Default::default()
            },
        ),
        rule(
            FilePatterns::One("docs/**/*.md".to_string()),
            OptionsPatch {
                print_width: Some(120),
                ..Default::default()
            },
        ),
    ]);
    let resolver = Resolver::new(config).unwrap();

    // Matches both rules: the later rule's value wins
    let resolved = resolver.resolve(Path::new("docs/guide/intro.md"));
    assert_eq!(resolved.options.print_width, 120);

    // Matches only the first rule
    let resolved = resolver.resolve(Path::new("README.md"));
    assert_eq!(resolved.options.print_width, 100);

    // Matches nothing: base wins
    let resolved = resolver.resolve(Path::new("src/main.ts"));
    assert_eq!(resolved.options.print_width, 80);
}

#[test]
fn test_unspecified_keys_fall_through_to_earlier_layers() {
    let config = config_with(vec![
        rule(
            FilePatterns::One("*.vue".to_string()),
            OptionsPatch {
                tab_width: Some(2),
                trailing_comma: Some(TrailingComma::None),
                ..Default::default()
            },
        ),
        rule(
            FilePatterns::One("src/**/*.vue".to_string()),
            OptionsPatch {
                print_width: Some(120),
                ..Default::default()
            },
        ),
    ]);
    let resolver = Resolver::new(config).unwrap();

    let resolved = resolver.resolve(Path::new("src/pages/Home.vue"));

    // From the second rule
    assert_eq!(resolved.options.print_width, 120);
    // From the first rule, untouched by the second
    assert_eq!(resolved.options.tab_width, 2);
    assert_eq!(resolved.options.trailing_comma, TrailingComma::None);
    // From the base
    assert!(resolved.options.single_quote);
    // Never specified anywhere: built-in default
    assert!(resolved.options.semi);
    assert_eq!(resolved.origins["semi"], OptionOrigin::Default);
}

#[test]
fn test_rules_do_not_affect_each_other_across_paths() {
    let resolver = Resolver::new(FormatterConfig::recommended()).unwrap();

    // Resolving one path must not leak state into the next resolution
    let vue = resolver.resolve(Path::new("src/App.vue"));
    assert_eq!(vue.options.tab_width, 2);

    let plain = resolver.resolve(Path::new("src/app.ts"));
    assert_eq!(plain.options.tab_width, 4);
    assert!(plain.matched.is_empty());
}

#[test]
fn test_parser_override_only_applies_to_matching_extensions() {
    let resolver = Resolver::new(FormatterConfig::recommended()).unwrap();

    let njk = resolver.resolve(Path::new("emails/welcome.njk"));
    assert_eq!(njk.options.parser.as_deref(), Some("html"));

    let templated = resolver.resolve(Path::new("app/templates/emails/welcome.html"));
    assert_eq!(templated.options.parser.as_deref(), Some("jinja-template"));

    let plain_html = resolver.resolve(Path::new("public/index.html"));
    assert!(plain_html.options.parser.is_none());
}

#[test]
fn test_validation_rejects_empty_patterns_and_empty_options() {
    let empty_files = config_with(vec![rule(
        FilePatterns::Many(vec![]),
        OptionsPatch {
            tab_width: Some(2),
            ..Default::default()
        },
    )]);
    assert!(empty_files.validate().is_err());

    let empty_options = config_with(vec![rule(
        FilePatterns::One("*.vue".to_string()),
        OptionsPatch::default(),
    )]);
    assert!(empty_options.validate().is_err());
}

#[test]
fn test_base_config_cannot_carry_pattern_fields() {
    let err = FormatterConfig::from_json_str(
        r#"{"print_width": 80, "files": "*.vue"}"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("'files'"));
}

#[test]
fn test_serialization_roundtrip_is_identical() {
    let config = config_with(vec![
        rule(
            FilePatterns::One("*.scss".to_string()),
            OptionsPatch {
                single_quote: Some(false),
                ..Default::default()
            },
        ),
        rule(
            FilePatterns::Many(vec!["*.njk".to_string(), "*.twig".to_string()]),
            OptionsPatch {
                parser: Some("html".to_string()),
                ..Default::default()
            },
        ),
    ]);

    let json = config.to_json().unwrap();
    let back = FormatterConfig::from_json_str(&json).unwrap();

    assert_eq!(back, config);

    // A second trip produces byte-identical output
    assert_eq!(back.to_json().unwrap(), json);
}
