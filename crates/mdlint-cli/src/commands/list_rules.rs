//! List rules command implementation.

use anyhow::Result;
use mdlint_core::{Registry, Rule};
use mdlint_rules::registry;
use serde::Serialize;

/// Catalog entry as printed with `--json`.
#[derive(Debug, Serialize)]
struct RuleInfo<'a> {
    code: &'a str,
    alias: &'a str,
    description: &'a str,
    tags: &'a [&'a str],
    params: Vec<(&'a str, String)>,
}

impl<'a> RuleInfo<'a> {
    fn new(rule: &'a dyn Rule) -> Self {
        Self {
            code: rule.code(),
            alias: rule.name(),
            description: rule.description(),
            tags: rule.tags(),
            params: rule
                .params()
                .iter()
                .map(|spec| (spec.name, spec.default_value().to_directive_syntax()))
                .collect(),
        }
    }
}

/// Runs the list-rules command.
pub fn run(tag: Option<&str>, json: bool) -> Result<()> {
    let infos = collect(registry(), tag);

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("{:<7} {:<26} {:<32} Description", "Code", "Alias", "Tags");
    println!("{}", "-".repeat(100));
    for info in &infos {
        println!(
            "{:<7} {:<26} {:<32} {}",
            info.code,
            info.alias,
            info.tags.join(","),
            info.description
        );
        for (name, default) in &info.params {
            println!("{:<7} :{name} => {default}", "");
        }
    }

    println!("\nUse rule ids or aliases in a style file, e.g.:");
    println!("  rule 'MD007', :indent => 4");
    println!("  exclude_rule 'line-length'");
    Ok(())
}

fn collect<'a>(registry: &'a Registry, tag: Option<&'a str>) -> Vec<RuleInfo<'a>> {
    match tag {
        Some(tag) => registry.with_tag(tag).map(RuleInfo::new).collect(),
        None => registry.iter().map(RuleInfo::new).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_whole_catalog_in_code_order() {
        let infos = collect(registry(), None);
        assert_eq!(infos.len(), registry().len());
        assert_eq!(infos[0].code, "MD001");
        assert!(infos.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn tag_filter_and_param_defaults() {
        let infos = collect(registry(), Some("indentation"));
        let md007 = infos.iter().find(|i| i.code == "MD007").unwrap();
        assert_eq!(md007.params, vec![("indent", "2".to_string())]);
        assert!(infos.iter().all(|i| i.tags.contains(&"indentation")));
    }
}
