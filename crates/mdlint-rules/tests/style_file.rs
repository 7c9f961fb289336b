//! End-to-end: the built-in catalog driven by a real style file.

use mdlint_core::{Engine, Policy, Resolver, RuleParams, RuleState};
use mdlint_rules::registry;

const STYLE: &str = "all

rule 'MD007', :indent => 4 # Unordered list indentation

exclude_rule 'MD001' # Header levels should only increment by one level at a time
exclude_rule 'MD012' # Multiple consecutive blank lines
exclude_rule 'MD014' # Dollar signs used before commands without showing output
exclude_rule 'MD033' # Inline HTML
exclude_rule 'MD036' # Emphasis used instead of a header
";

const DOC: &str = "# Guide

Intro paragraph.

- top
  - nested two
- next

```sh
$ ls
```

**Bold heading**

```
plain
```
";

fn style_policy() -> Policy {
    Resolver::new(registry())
        .resolve_str(STYLE)
        .expect("style file resolves")
}

fn found(policy: Policy, text: &str) -> Vec<(usize, String)> {
    let engine = Engine::builder(registry())
        .policy(policy)
        .parallel(false)
        .build()
        .expect("engine builds");
    engine
        .evaluate(&mdlint_core::Document::parse(text))
        .iter()
        .map(|v| (v.line, v.code.clone()))
        .collect()
}

#[test]
fn style_file_resolves_to_expected_policy() {
    let policy = style_policy();
    let reg = registry();
    assert_eq!(policy.len(), reg.len());

    for code in ["MD001", "MD012", "MD014", "MD033", "MD036"] {
        assert_eq!(policy.state(code), Some(&RuleState::Disabled), "{code}");
    }

    let md007 = policy.params("MD007").expect("MD007 enabled");
    assert_eq!(md007.get_int("indent", 0), 4);

    for rule in reg.iter() {
        if matches!(rule.code(), "MD001" | "MD007" | "MD012" | "MD014" | "MD033" | "MD036") {
            continue;
        }
        assert_eq!(
            policy.params(rule.code()),
            Some(&RuleParams::defaults(rule.params())),
            "{} should run with defaults",
            rule.code()
        );
    }
}

#[test]
fn style_file_is_deterministic_and_round_trips() {
    let policy = style_policy();
    assert_eq!(policy, style_policy());

    let again = Resolver::new(registry())
        .resolve_str(&policy.to_directives())
        .expect("rendered policy resolves");
    assert_eq!(policy, again);
}

#[test]
fn style_file_changes_what_is_reported() {
    let styled = found(style_policy(), DOC);
    assert_eq!(
        styled,
        vec![(6, "MD007".to_string()), (15, "MD040".to_string())]
    );

    let defaults = found(Policy::all_enabled(registry()), DOC);
    assert!(defaults.contains(&(9, "MD014".to_string())));
    assert!(defaults.contains(&(13, "MD036".to_string())));
    assert!(!defaults.iter().any(|(_, code)| code == "MD007"));
}

fn ul_indent_positions(policy: Policy, text: &str) -> Vec<(usize, Option<usize>)> {
    let engine = Engine::builder(registry())
        .policy(policy)
        .parallel(false)
        .build()
        .expect("engine builds");
    engine
        .evaluate(&mdlint_core::Document::parse(text))
        .iter()
        .filter(|v| v.code == "MD007")
        .map(|v| (v.line, v.column))
        .collect()
}

#[test]
fn tab_indented_bullets_are_measured_on_their_own_line() {
    let text = "# Tabs\n\n- a\n\t- tab nested\n  - two spaces\n";
    assert_eq!(ul_indent_positions(style_policy(), text), vec![(5, Some(3))]);

    let policy = Resolver::new(registry())
        .resolve_str("rule 'ul-indent', :indent => 3\n")
        .expect("style file resolves");
    assert_eq!(
        ul_indent_positions(policy, "- a\n\t- b\n"),
        vec![(2, Some(5))]
    );
}

#[test]
fn aliases_work_in_style_files() {
    let policy = Resolver::new(registry())
        .resolve_str("all\nexclude_rule 'line-length'\nrule 'ul-indent', :indent => 3\n")
        .expect("aliases resolve");
    assert!(!policy.is_enabled("MD013"));
    assert_eq!(
        policy.params("MD007").map(|p| p.get_int("indent", 0)),
        Some(3)
    );
}

#[test]
fn tags_select_rule_groups() {
    let policy = Resolver::new(registry())
        .resolve_str("tag 'headers'\n")
        .expect("tag resolves");
    let reg = registry();
    for rule in reg.iter() {
        let tagged = rule.tags().contains(&"headers");
        assert_eq!(policy.is_enabled(rule.code()), tagged, "{}", rule.code());
    }
}

#[test]
fn lint_str_reports_file_path() {
    let engine = Engine::builder(registry())
        .policy(style_policy())
        .build()
        .expect("engine builds");
    let report = engine.lint_str("docs/guide.md", DOC);
    assert_eq!(report.path, std::path::Path::new("docs/guide.md"));
    assert_eq!(report.violations.len(), 2);
    assert!(report.warnings.is_empty());
}
