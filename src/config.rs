//! Declarative grammar files.
//!
//! A grammar file names additional patterns built from primitives, the
//! built-in patterns, and each other. It compiles into a [`Grammar`] whose
//! patterns share nodes exactly like the built-ins do.
//!
//! ## Example YAML grammar
//!
//! ```yaml
//! version: "1.0"
//! name: "transports"
//! patterns:
//!   QUIC:
//!     type: and
//!     of:
//!       - { type: ref, name: UDP }
//!       - { type: base, name: quic }
//!   Secure:
//!     type: or
//!     of:
//!       - { type: ref, name: QUIC }
//!       - { type: ref, name: WebSocketsSecure }
//! ```
//!
//! A `ref` resolves to another pattern declared in the same file or, failing
//! that, to a built-in name from [`named::ALL`](crate::named::ALL).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Level};

use crate::error::GrammarError;
use crate::named;
use crate::pattern::{and, base, or, Pattern};

/// One node of a declared pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternExpr {
    /// A single protocol token.
    Base { name: String },
    /// Another declared pattern or a built-in one.
    Ref { name: String },
    /// Ordered sequence.
    And { of: Vec<PatternExpr> },
    /// Ordered alternatives.
    Or { of: Vec<PatternExpr> },
}

/// Top-level grammar file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Grammar format version
    pub version: String,

    /// Optional grammar name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub patterns: BTreeMap<String, PatternExpr>,
}

impl GrammarConfig {
    /// Load a grammar file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a YAML grammar from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, GrammarError> {
        let config: GrammarConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON grammar from a string
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let config: GrammarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GrammarError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(GrammarError::UnsupportedVersion(v.to_string())),
        }?;

        for (rule, expr) in &self.patterns {
            if rule.trim().is_empty() {
                return Err(GrammarError::Validation(
                    "pattern names must not be empty".to_string(),
                ));
            }
            if named::lookup(rule).is_some() {
                return Err(GrammarError::Validation(format!(
                    "pattern `{rule}` shadows a built-in pattern"
                )));
            }
            validate_expr(rule, expr)?;
        }
        Ok(())
    }

    /// Resolve every declared pattern into a shared [`Pattern`] graph.
    pub fn compile(&self) -> Result<Grammar, GrammarError> {
        let span = tracing::span!(
            Level::INFO,
            "mafmt.grammar",
            grammar = ?self.name,
            rules = self.patterns.len()
        );
        let _guard = span.enter();

        match self.compile_inner() {
            Ok(grammar) => {
                debug!(rules = grammar.patterns.len(), "grammar_compiled");
                Ok(grammar)
            }
            Err(err) => {
                warn!(error = %err, "grammar_failure");
                Err(err)
            }
        }
    }

    fn compile_inner(&self) -> Result<Grammar, GrammarError> {
        self.validate()?;

        let mut compiler = Compiler {
            rules: &self.patterns,
            resolved: BTreeMap::new(),
            in_progress: Vec::new(),
        };
        for rule in self.patterns.keys() {
            compiler.resolve(rule)?;
        }

        Ok(Grammar {
            name: self.name.clone(),
            patterns: compiler.resolved,
        })
    }
}

fn validate_expr(rule: &str, expr: &PatternExpr) -> Result<(), GrammarError> {
    match expr {
        PatternExpr::Base { name } | PatternExpr::Ref { name } => {
            if name.trim().is_empty() {
                return Err(GrammarError::Validation(format!(
                    "pattern `{rule}`: names must not be empty"
                )));
            }
            Ok(())
        }
        PatternExpr::And { of } | PatternExpr::Or { of } => {
            if of.is_empty() {
                return Err(GrammarError::Validation(format!(
                    "pattern `{rule}`: `and`/`or` need at least one child"
                )));
            }
            of.iter().try_for_each(|child| validate_expr(rule, child))
        }
    }
}

struct Compiler<'a> {
    rules: &'a BTreeMap<String, PatternExpr>,
    resolved: BTreeMap<String, Pattern>,
    in_progress: Vec<String>,
}

impl Compiler<'_> {
    fn resolve(&mut self, rule: &str) -> Result<Pattern, GrammarError> {
        if let Some(pattern) = self.resolved.get(rule) {
            return Ok(pattern.clone());
        }
        if self.in_progress.iter().any(|pending| pending == rule) {
            let mut cycle = self.in_progress.clone();
            cycle.push(rule.to_string());
            return Err(GrammarError::Cycle(cycle));
        }
        let Some(expr) = self.rules.get(rule) else {
            if let Some(builtin) = named::lookup(rule) {
                return Ok(builtin.clone());
            }
            let referrer = self.in_progress.last().cloned().unwrap_or_default();
            return Err(GrammarError::UnknownPattern {
                rule: referrer,
                name: rule.to_string(),
            });
        };

        self.in_progress.push(rule.to_string());
        let pattern = self.build(expr)?;
        self.in_progress.pop();

        debug!(rule, pattern = %pattern, "grammar_rule_compiled");
        self.resolved.insert(rule.to_string(), pattern.clone());
        Ok(pattern)
    }

    fn build(&mut self, expr: &PatternExpr) -> Result<Pattern, GrammarError> {
        match expr {
            PatternExpr::Base { name } => Ok(base(name.as_str())),
            PatternExpr::Ref { name } => self.resolve(name),
            PatternExpr::And { of } => Ok(and(self.build_all(of)?)),
            PatternExpr::Or { of } => Ok(or(self.build_all(of)?)),
        }
    }

    fn build_all(&mut self, exprs: &[PatternExpr]) -> Result<Vec<Pattern>, GrammarError> {
        exprs.iter().map(|expr| self.build(expr)).collect()
    }
}

/// Compiled grammar: declared patterns plus the built-ins they may reference.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    name: Option<String>,
    patterns: BTreeMap<String, Pattern>,
}

impl Grammar {
    /// Load and compile a grammar file in one step.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
        GrammarConfig::from_file(path)?.compile()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A declared pattern, falling back to the built-ins.
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name).or_else(|| named::lookup(name))
    }

    /// Built-in names in declaration order, then declared names sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        named::ALL
            .iter()
            .copied()
            .chain(self.patterns.keys().map(String::as_str))
    }

    /// Every pattern name (built-in or declared) that fully matches `protos`.
    pub fn classify<S: AsRef<str>>(&self, protos: &[S]) -> Vec<&str> {
        self.names()
            .filter(|name| {
                self.get(name)
                    .is_some_and(|pattern| pattern.matches_protocols(protos))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIC_GRAMMAR: &str = r#"
version: "1.0"
name: "transports"
patterns:
  QUIC:
    type: and
    of:
      - { type: ref, name: UDP }
      - { type: base, name: quic }
  Secure:
    type: or
    of:
      - { type: ref, name: QUIC }
      - { type: ref, name: WebSocketsSecure }
"#;

    #[test]
    fn yaml_grammar_compiles_and_matches() {
        let grammar = GrammarConfig::from_yaml(QUIC_GRAMMAR)
            .and_then(|cfg| cfg.compile())
            .expect("grammar compiles");

        assert_eq!(grammar.name(), Some("transports"));
        let quic = grammar.get("QUIC").expect("declared");
        assert!(quic.matches_protocols(&["ip4", "udp", "quic"]));
        assert!(!quic.matches_protocols(&["ip4", "tcp", "quic"]));

        let secure = grammar.get("Secure").expect("declared");
        assert!(secure.matches_protocols(&["ip6", "udp", "quic"]));
        assert!(secure.matches_protocols(&["dns", "wss"]));
    }

    #[test]
    fn references_share_nodes() {
        let grammar = GrammarConfig::from_yaml(QUIC_GRAMMAR)
            .and_then(|cfg| cfg.compile())
            .expect("grammar compiles");

        let quic = grammar.get("QUIC").expect("declared");
        let secure = grammar.get("Secure").expect("declared");
        assert!(secure.children()[0].ptr_eq(quic));
        assert!(quic.children()[0].ptr_eq(&named::UDP));
        assert!(secure.children()[1].ptr_eq(&named::WEB_SOCKETS_SECURE));
    }

    #[test]
    fn classify_includes_declared_patterns() {
        let grammar = GrammarConfig::from_yaml(QUIC_GRAMMAR)
            .and_then(|cfg| cfg.compile())
            .expect("grammar compiles");

        assert_eq!(
            grammar.classify(&["ip4", "udp", "quic"]),
            vec!["QUIC", "Secure"]
        );
        assert_eq!(grammar.classify(&["ip4", "tcp"]), vec!["TCP", "Reliable"]);
        assert!(grammar.get("IPFS").is_some());
        assert_eq!(grammar.names().count(), named::ALL.len() + 2);
    }

    #[test]
    fn json_grammar_parses() {
        let json = r#"{
            "version": "1",
            "patterns": {
                "Onion": { "type": "base", "name": "onion3" }
            }
        }"#;
        let grammar = GrammarConfig::from_json(json)
            .and_then(|cfg| cfg.compile())
            .expect("grammar compiles");

        assert_eq!(grammar.name(), None);
        assert!(grammar.get("Onion").expect("declared").matches_protocols(&["onion3"]));
    }

    #[test]
    fn unsupported_version_rejected() {
        let err = GrammarConfig::from_yaml("version: \"2.0\"\npatterns: {}\n")
            .expect_err("version 2 is unknown");
        assert!(matches!(err, GrammarError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn empty_composite_rejected() {
        let yaml = "version: \"1\"\npatterns:\n  Nothing:\n    type: or\n    of: []\n";
        let err = GrammarConfig::from_yaml(yaml).expect_err("empty `or` is invalid");
        match err {
            GrammarError::Validation(msg) => assert!(msg.contains("Nothing")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_base_name_rejected() {
        let yaml = "version: \"1\"\npatterns:\n  Blank:\n    type: base\n    name: \"\"\n";
        let err = GrammarConfig::from_yaml(yaml).expect_err("blank base is invalid");
        assert!(matches!(err, GrammarError::Validation(_)));
    }

    #[test]
    fn shadowing_builtin_rejected() {
        let yaml = "version: \"1\"\npatterns:\n  TCP:\n    type: base\n    name: tcp\n";
        let err = GrammarConfig::from_yaml(yaml).expect_err("TCP is built in");
        match err {
            GrammarError::Validation(msg) => assert!(msg.contains("shadows")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_reference_rejected() {
        let yaml = "version: \"1\"\npatterns:\n  Mesh:\n    type: ref\n    name: Missing\n";
        let err = GrammarConfig::from_yaml(yaml)
            .and_then(|cfg| cfg.compile())
            .expect_err("Missing is not defined");
        match err {
            GrammarError::UnknownPattern { rule, name } => {
                assert_eq!(rule, "Mesh");
                assert_eq!(name, "Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reference_cycle_rejected() {
        let yaml = r#"
version: "1"
patterns:
  A:
    type: and
    of:
      - { type: ref, name: B }
  B:
    type: or
    of:
      - { type: base, name: x }
      - { type: ref, name: A }
"#;
        let err = GrammarConfig::from_yaml(yaml)
            .and_then(|cfg| cfg.compile())
            .expect_err("A and B reference each other");
        match err {
            GrammarError::Cycle(path) => assert_eq!(path, vec!["A", "B", "A"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
