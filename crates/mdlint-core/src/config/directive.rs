//! Parser for the style file directive grammar.
//!
//! ```text
//! all
//! rule 'MD007', :indent => 4      # Ruby hash-rocket options
//! rule 'MD013', line_length: 120  # or label options
//! exclude_rule 'MD001'
//! tag :headers
//! exclude_tag :whitespace
//! ```

use super::ConfigError;
use crate::params::Literal;

/// One parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Enable every known rule at defaults.
    All,
    /// Enable a rule, optionally overriding options.
    Rule {
        /// Rule code or alias.
        id: String,
        /// Options in written order.
        options: Vec<(String, Literal)>,
    },
    /// Disable a rule unconditionally.
    ExcludeRule {
        /// Rule code or alias.
        id: String,
    },
    /// Enable every rule carrying a tag.
    Tag {
        /// Tag name.
        tag: String,
    },
    /// Disable every rule carrying a tag.
    ExcludeTag {
        /// Tag name.
        tag: String,
    },
}

/// A directive with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    /// Source line.
    pub line: usize,
    /// The directive.
    pub directive: Directive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Label(String),
    Str(String),
    Symbol(String),
    Int(i64),
    Arrow,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Word(w) => format!("`{w}`"),
            Self::Label(l) => format!("`{l}:`"),
            Self::Str(s) => format!("'{s}'"),
            Self::Symbol(s) => format!(":{s}"),
            Self::Int(n) => n.to_string(),
            Self::Arrow => "`=>`".to_string(),
            Self::Comma => "`,`".to_string(),
        }
    }
}

/// Parses a style file into directives.
///
/// # Errors
///
/// Returns [`ConfigError::Syntax`] for the first malformed line.
pub fn parse_directives(text: &str) -> Result<Vec<DirectiveLine>, ConfigError> {
    let mut out = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let tokens = tokenize(raw).map_err(|message| ConfigError::Syntax { line, message })?;
        if tokens.is_empty() {
            continue;
        }
        let directive =
            parse_line(&tokens).map_err(|message| ConfigError::Syntax { line, message })?;
        out.push(DirectiveLine { line, directive });
    }
    Ok(out)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn tokenize(line: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '#' => break,
            c if c.is_whitespace() || c == '(' || c == ')' => {
                chars.next();
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                if chars.next().map(|(_, c)| c) != Some('>') {
                    return Err("expected `=>`".to_string());
                }
                tokens.push(Token::Arrow);
            }
            '\'' | '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, ch)) = chars.next() {
                    match ch {
                        '\\' => {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        ch if ch == c => {
                            closed = true;
                            break;
                        }
                        ch => value.push(ch),
                    }
                }
                if !closed {
                    return Err("unterminated string".to_string());
                }
                tokens.push(Token::Str(value));
            }
            ':' => {
                chars.next();
                let mut name = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !is_word_char(ch) {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(format!("expected a symbol name at column {}", start + 1));
                }
                tokens.push(Token::Symbol(name));
            }
            c if c == '-' || c.is_ascii_digit() => {
                let mut text = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !(ch.is_ascii_digit() || (ch == '-' && text.is_empty()) || ch == '_') {
                        break;
                    }
                    if ch != '_' {
                        text.push(ch);
                    }
                    chars.next();
                }
                let n = text
                    .parse::<i64>()
                    .map_err(|_| format!("invalid integer `{text}`"))?;
                tokens.push(Token::Int(n));
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !is_word_char(ch) {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                let is_label = {
                    let mut ahead = chars.clone();
                    matches!(ahead.next(), Some((_, ':')))
                        && !matches!(ahead.peek(), Some((_, ch)) if is_word_char(*ch) || *ch == ':')
                };
                if is_label {
                    chars.next();
                    tokens.push(Token::Label(word));
                } else {
                    tokens.push(Token::Word(word));
                }
            }
            other => return Err(format!("unexpected character `{other}`")),
        }
    }

    Ok(tokens)
}

fn parse_line(tokens: &[Token]) -> Result<Directive, String> {
    let (keyword, rest) = match tokens.split_first() {
        Some((Token::Word(w), rest)) => (w.as_str(), rest),
        Some((other, _)) => return Err(format!("expected a directive, found {}", other.describe())),
        None => return Err("empty directive".to_string()),
    };

    match keyword {
        "all" => {
            expect_end(rest)?;
            Ok(Directive::All)
        }
        "rule" => {
            let (id, rest) = reference(rest, "rule id")?;
            let options = options(rest)?;
            Ok(Directive::Rule { id, options })
        }
        "exclude_rule" => {
            let (id, rest) = reference(rest, "rule id")?;
            expect_end(rest)?;
            Ok(Directive::ExcludeRule { id })
        }
        "tag" => {
            let (tag, rest) = reference(rest, "tag")?;
            expect_end(rest)?;
            Ok(Directive::Tag { tag })
        }
        "exclude_tag" => {
            let (tag, rest) = reference(rest, "tag")?;
            expect_end(rest)?;
            Ok(Directive::ExcludeTag { tag })
        }
        other => Err(format!("unknown directive `{other}`")),
    }
}

fn reference<'t>(tokens: &'t [Token], what: &str) -> Result<(String, &'t [Token]), String> {
    match tokens.split_first() {
        Some((Token::Str(s) | Token::Symbol(s), rest)) => Ok((s.clone(), rest)),
        Some((other, _)) => Err(format!("expected {what}, found {}", other.describe())),
        None => Err(format!("missing {what}")),
    }
}

fn expect_end(tokens: &[Token]) -> Result<(), String> {
    match tokens.first() {
        None => Ok(()),
        Some(t) => Err(format!("unexpected {} after directive", t.describe())),
    }
}

fn options(mut tokens: &[Token]) -> Result<Vec<(String, Literal)>, String> {
    let mut out = Vec::new();
    while let Some((first, rest)) = tokens.split_first() {
        if *first != Token::Comma {
            return Err(format!("expected `,` before option, found {}", first.describe()));
        }
        let (key, rest) = match rest {
            [Token::Label(k), rest @ ..] => (k.clone(), rest),
            [Token::Symbol(k) | Token::Str(k) | Token::Word(k), Token::Arrow, rest @ ..] => {
                (k.clone(), rest)
            }
            [] => return Err("trailing `,`".to_string()),
            [other, ..] => return Err(format!("expected an option name, found {}", other.describe())),
        };
        let (value, rest) = match rest.split_first() {
            Some((Token::Int(n), rest)) => (Literal::Integer(*n), rest),
            Some((Token::Str(s), rest)) => (Literal::Str(s.clone()), rest),
            Some((Token::Symbol(s), rest)) => (Literal::Symbol(s.clone()), rest),
            Some((Token::Word(w), rest)) if w == "true" => (Literal::Boolean(true), rest),
            Some((Token::Word(w), rest)) if w == "false" => (Literal::Boolean(false), rest),
            Some((other, _)) => {
                return Err(format!("invalid value {} for option `{key}`", other.describe()))
            }
            None => return Err(format!("missing value for option `{key}`")),
        };
        out.push((key, value));
        tokens = rest;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Directive> {
        parse_directives(text)
            .expect("should parse")
            .into_iter()
            .map(|d| d.directive)
            .collect()
    }

    #[test]
    fn parses_style_file_with_comments() {
        let text = "all\n\nrule 'MD007', :indent => 4 # Unordered list indentation\n\nexclude_rule 'MD001' # Header levels\n";
        assert_eq!(
            parse(text),
            vec![
                Directive::All,
                Directive::Rule {
                    id: "MD007".into(),
                    options: vec![("indent".into(), Literal::Integer(4))],
                },
                Directive::ExcludeRule { id: "MD001".into() },
            ]
        );
    }

    #[test]
    fn keeps_line_numbers() {
        let lines: Vec<usize> = parse_directives("# header\nall\n\nexclude_rule 'MD012'\n")
            .unwrap()
            .iter()
            .map(|d| d.line)
            .collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn label_options_and_mixed_values() {
        assert_eq!(
            parse(r#"rule "MD013", line_length: 120, :code_blocks=>false, 'style' => :atx"#),
            vec![Directive::Rule {
                id: "MD013".into(),
                options: vec![
                    ("line_length".into(), Literal::Integer(120)),
                    ("code_blocks".into(), Literal::Boolean(false)),
                    ("style".into(), Literal::Symbol("atx".into())),
                ],
            }]
        );
    }

    #[test]
    fn hash_inside_string_is_not_a_comment() {
        assert_eq!(
            parse("rule 'MD026', :punctuation => '.#!'"),
            vec![Directive::Rule {
                id: "MD026".into(),
                options: vec![("punctuation".into(), Literal::Str(".#!".into()))],
            }]
        );
    }

    #[test]
    fn tags_accept_symbols_and_strings() {
        assert_eq!(
            parse("tag :headers\nexclude_tag 'whitespace'"),
            vec![
                Directive::Tag { tag: "headers".into() },
                Directive::ExcludeTag { tag: "whitespace".into() },
            ]
        );
    }

    #[test]
    fn negative_integers() {
        assert_eq!(
            parse("rule 'MD999', :x => -1"),
            vec![Directive::Rule {
                id: "MD999".into(),
                options: vec![("x".into(), Literal::Integer(-1))],
            }]
        );
    }

    #[test]
    fn syntax_errors_carry_the_line() {
        let err = parse_directives("all\nrule MD007\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }), "{err:?}");

        let err = parse_directives("rule 'MD007', :indent =>\n").unwrap_err();
        assert!(err.to_string().contains("missing value"), "{err}");

        let err = parse_directives("enable 'MD007'\n").unwrap_err();
        assert!(err.to_string().contains("unknown directive"), "{err}");

        let err = parse_directives("exclude_rule 'MD007\n").unwrap_err();
        assert!(err.to_string().contains("unterminated"), "{err}");

        let err = parse_directives("all 'MD007'\n").unwrap_err();
        assert!(err.to_string().contains("unexpected"), "{err}");
    }
}
