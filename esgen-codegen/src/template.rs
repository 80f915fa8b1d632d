//! Output templates.
//!
//! A [`Template`] turns the rendered structure block plus a few names into the
//! final document. Two built-in templates cover the wrapper and no-wrapper
//! layouts. [`CustomTemplate`] accepts a user document written in this subset
//! of Go's `text/template` syntax:
//!
//! - `{{.Name}}` substitutes a variable (`PackageName`, `InitClassName` or
//!   `WrapperName`, `StructName`, `StructDefinitions`)
//! - `{{if .Name}}...{{else}}...{{end}}` renders a branch when the variable is
//!   non-empty, and may be nested
//! - `{{/* ... */}}` is a comment
//! - `{{-` and `-}}` trim the whitespace before or after the action
//!
//! Any other action is rejected when the template is parsed.

use crate::error::CodegenError;
use regex::Regex;
use std::sync::OnceLock;

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// Go package name.
    pub package_name: String,
    /// Optional wrapper structure name.
    pub wrapper_name: Option<String>,
    /// Root structure name.
    pub struct_name: String,
    /// Rendered structure declarations.
    pub struct_definitions: String,
}

impl Bindings {
    /// Looks up a variable by its template name.
    ///
    /// An absent wrapper name reads as the empty string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "PackageName" => Some(&self.package_name),
            "InitClassName" | "WrapperName" => Some(self.wrapper_name.as_deref().unwrap_or("")),
            "StructName" => Some(&self.struct_name),
            "StructDefinitions" => Some(&self.struct_definitions),
            _ => None,
        }
    }
}

/// Rendering strategy for the final document.
pub trait Template: Send + Sync {
    /// Renders the document.
    fn render(&self, bindings: &Bindings) -> String;
}

/// Built-in document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTemplate {
    /// Package clause, a wrapper embedding the root structure, then the
    /// structure declarations.
    WithWrapper,
    /// Package clause and the structure declarations.
    WithoutWrapper,
}

impl Template for BuiltinTemplate {
    fn render(&self, bindings: &Bindings) -> String {
        match self {
            Self::WithWrapper => format!(
                "package {}\n\ntype {} struct {{\n\t{}\n}}\n\n{}\n",
                bindings.package_name,
                bindings.wrapper_name.as_deref().unwrap_or(""),
                bindings.struct_name,
                bindings.struct_definitions
            ),
            Self::WithoutWrapper => format!(
                "package {}\n\n{}\n",
                bindings.package_name, bindings.struct_definitions
            ),
        }
    }
}

/// Chooses the template for a run: the custom one if given, otherwise the
/// built-in matching whether a wrapper was requested.
#[must_use]
pub fn select_template(custom: Option<CustomTemplate>, has_wrapper: bool) -> Box<dyn Template> {
    match custom {
        Some(template) => Box::new(template),
        None if has_wrapper => Box::new(BuiltinTemplate::WithWrapper),
        None => Box::new(BuiltinTemplate::WithoutWrapper),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    If {
        var: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A parsed user-supplied template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTemplate {
    nodes: Vec<Node>,
}

fn action_regex() -> &'static Regex {
    static ACTION: OnceLock<Regex> = OnceLock::new();
    ACTION.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("valid action regex"))
}

/// An `if` block under construction.
struct Frame {
    var: String,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl Frame {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.otherwise.as_mut() {
            Some(otherwise) => otherwise,
            None => &mut self.then,
        }
    }
}

impl CustomTemplate {
    /// Parses a template document.
    ///
    /// # Errors
    /// Returns `CodegenError::Template` on an unterminated action, an
    /// unsupported action, or unbalanced `if`/`else`/`end`.
    pub fn parse(source: &str) -> Result<Self, CodegenError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut last = 0;
        let mut trim_next = false;

        for caps in action_regex().captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let (raw, trim_before, trim_after) = strip_trim_markers(&caps[1]);

            let mut text = &source[last..whole.start()];
            if trim_next {
                text = text.trim_start_matches(is_template_space);
            }
            if trim_before {
                text = text.trim_end_matches(is_template_space);
            }
            push_text(target(&mut root, &mut stack), text)?;
            last = whole.end();
            trim_next = trim_after;

            let action = raw.trim();
            if action.starts_with("/*") && action.ends_with("*/") {
                continue;
            }
            if let Some(var) = action.strip_prefix('.') {
                target(&mut root, &mut stack).push(Node::Var(parse_var(var)?));
            } else if let Some(cond) = action.strip_prefix("if ") {
                let cond = cond.trim();
                let var = cond.strip_prefix('.').ok_or_else(|| {
                    CodegenError::template(format!("unsupported condition '{}'", cond))
                })?;
                stack.push(Frame {
                    var: parse_var(var)?,
                    then: Vec::new(),
                    otherwise: None,
                });
            } else if action == "else" {
                let frame = stack
                    .last_mut()
                    .ok_or_else(|| CodegenError::template("'else' outside of 'if'"))?;
                if frame.otherwise.is_some() {
                    return Err(CodegenError::template("duplicate 'else'"));
                }
                frame.otherwise = Some(Vec::new());
            } else if action == "end" {
                let frame = stack
                    .pop()
                    .ok_or_else(|| CodegenError::template("'end' without 'if'"))?;
                target(&mut root, &mut stack).push(Node::If {
                    var: frame.var,
                    then: frame.then,
                    otherwise: frame.otherwise.unwrap_or_default(),
                });
            } else {
                return Err(CodegenError::template(format!(
                    "unsupported action '{{{{{}}}}}'",
                    action
                )));
            }
        }

        let mut text = &source[last..];
        if trim_next {
            text = text.trim_start_matches(is_template_space);
        }
        push_text(target(&mut root, &mut stack), text)?;

        if let Some(frame) = stack.last() {
            return Err(CodegenError::template(format!("unclosed 'if .{}'", frame.var)));
        }

        Ok(Self { nodes: root })
    }

    /// Returns the names of all variables the template references.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_vars(&self.nodes, &mut out);
        out
    }
}

impl Template for CustomTemplate {
    fn render(&self, bindings: &Bindings) -> String {
        let mut output = String::new();
        render_nodes(&self.nodes, bindings, &mut output);
        output
    }
}

fn target<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => frame.current(),
        None => root,
    }
}

/// Whitespace removed by a trim marker.
fn is_template_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Splits `{{- ` and ` -}}` off an action body. A dash only counts as a
/// marker when whitespace separates it from the rest of the action.
fn strip_trim_markers(action: &str) -> (&str, bool, bool) {
    let mut body = action;
    let trim_before = body
        .strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(is_template_space));
    if trim_before {
        body = &body[1..];
    }
    let trim_after = body.strip_suffix('-').is_some_and(|rest| rest.ends_with(is_template_space));
    if trim_after {
        body = &body[..body.len() - 1];
    }
    (body, trim_before, trim_after)
}

fn push_text(nodes: &mut Vec<Node>, text: &str) -> Result<(), CodegenError> {
    if text.contains("{{") {
        return Err(CodegenError::template("unterminated action, missing '}}'"));
    }
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
    Ok(())
}

fn parse_var(name: &str) -> Result<String, CodegenError> {
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CodegenError::template(format!("invalid variable '.{}'", name)));
    }
    Ok(name.to_string())
}

fn lookup<'b>(bindings: &'b Bindings, name: &str) -> &'b str {
    match bindings.get(name) {
        Some(value) => value,
        None => {
            tracing::warn!("template references unknown variable '{}'", name);
            ""
        }
    }
}

fn render_nodes(nodes: &[Node], bindings: &Bindings, output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Var(name) => output.push_str(lookup(bindings, name)),
            Node::If {
                var,
                then,
                otherwise,
            } => {
                if lookup(bindings, var).is_empty() {
                    render_nodes(otherwise, bindings, output);
                } else {
                    render_nodes(then, bindings, output);
                }
            }
        }
    }
}

fn collect_vars<'n>(nodes: &'n [Node], out: &mut Vec<&'n str>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Var(name) => out.push(name),
            Node::If {
                var,
                then,
                otherwise,
            } => {
                out.push(var);
                collect_vars(then, out);
                collect_vars(otherwise, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(wrapper: Option<&str>) -> Bindings {
        Bindings {
            package_name: "searchmodel".to_string(),
            wrapper_name: wrapper.map(str::to_string),
            struct_name: "CafeDoc".to_string(),
            struct_definitions: "type CafeDoc struct {\n}\n\n".to_string(),
        }
    }

    #[test]
    fn test_builtin_without_wrapper() {
        let output = BuiltinTemplate::WithoutWrapper.render(&bindings(None));
        assert_eq!(output, "package searchmodel\n\ntype CafeDoc struct {\n}\n\n\n");
    }

    #[test]
    fn test_builtin_with_wrapper() {
        let output = BuiltinTemplate::WithWrapper.render(&bindings(Some("CafeDocWrapper")));
        assert_eq!(
            output,
            concat!(
                "package searchmodel\n\n",
                "type CafeDocWrapper struct {\n\tCafeDoc\n}\n\n",
                "type CafeDoc struct {\n}\n\n\n",
            )
        );
    }

    #[test]
    fn test_select_template() {
        let b = bindings(Some("W"));
        assert!(select_template(None, true).render(&b).contains("type W struct"));
        assert!(!select_template(None, false).render(&b).contains("type W struct"));

        let custom = CustomTemplate::parse("only {{.StructName}}").expect("Failed to parse");
        assert_eq!(select_template(Some(custom), true).render(&b), "only CafeDoc");
    }

    #[test]
    fn test_custom_substitution() {
        let template = CustomTemplate::parse(
            "// Code generated. DO NOT EDIT.\npackage {{ .PackageName }}\n\n{{.StructDefinitions}}",
        )
        .expect("Failed to parse");
        let output = template.render(&bindings(None));
        assert_eq!(
            output,
            "// Code generated. DO NOT EDIT.\npackage searchmodel\n\ntype CafeDoc struct {\n}\n\n"
        );
    }

    #[test]
    fn test_custom_may_omit_variables() {
        let template =
            CustomTemplate::parse("package {{.PackageName}}\n").expect("Failed to parse");
        let output = template.render(&bindings(None));
        assert_eq!(output, "package searchmodel\n");
    }

    #[test]
    fn test_custom_conditional() {
        let template = CustomTemplate::parse(
            concat!(
                "{{if .InitClassName}}type {{.InitClassName}} struct{ {{.StructName}} }",
                "{{else}}// no wrapper{{end}}",
            ),
        )
        .expect("Failed to parse");

        assert_eq!(
            template.render(&bindings(Some("Wrap"))),
            "type Wrap struct{ CafeDoc }"
        );
        assert_eq!(template.render(&bindings(None)), "// no wrapper");
    }

    #[test]
    fn test_custom_nested_conditional_and_comment() {
        let template = CustomTemplate::parse(
            "{{/* header */}}{{if .PackageName}}A{{if .WrapperName}}B{{end}}C{{end}}",
        )
        .expect("Failed to parse");
        assert_eq!(template.render(&bindings(None)), "AC");
        assert_eq!(template.render(&bindings(Some("W"))), "ABC");
    }

    #[test]
    fn test_unknown_variable_renders_empty() {
        let template = CustomTemplate::parse("[{{.Missing}}]").expect("Failed to parse");
        assert_eq!(template.render(&bindings(None)), "[]");
        assert_eq!(template.variables(), vec!["Missing"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(CustomTemplate::parse("package {{.PackageName").is_err());
        assert!(CustomTemplate::parse("{{if .StructName}}x").is_err());
        assert!(CustomTemplate::parse("x{{end}}").is_err());
        assert!(CustomTemplate::parse("{{else}}").is_err());
        assert!(CustomTemplate::parse("{{range .Fields}}{{end}}").is_err());
        assert!(CustomTemplate::parse("{{.}}").is_err());
        assert!(CustomTemplate::parse("{{if .A}}{{else}}{{else}}{{end}}").is_err());
    }

    #[test]
    fn test_trim_markers() {
        let b = Bindings {
            package_name: "p".to_string(),
            ..Bindings::default()
        };
        let template =
            CustomTemplate::parse("package {{- .PackageName -}}\n").expect("Failed to parse");
        assert_eq!(template.render(&b), "packagep");

        let template = CustomTemplate::parse(
            concat!(
                "package {{.PackageName}}\n\n",
                "{{- if .InitClassName }}\nwrapped\n{{- end }}\n\n",
                "{{- /* done */ -}}\n",
            ),
        )
        .expect("Failed to parse");
        assert_eq!(template.render(&b), "package p");
        assert_eq!(template.render(&bindings(Some("W"))), "package searchmodel\nwrapped");
    }

    #[test]
    fn test_dash_without_space_is_not_a_marker() {
        assert!(CustomTemplate::parse("{{-.PackageName}}").is_err());
        let template = CustomTemplate::parse("a {{.PackageName }} b").expect("Failed to parse");
        assert_eq!(template.render(&bindings(None)), "a searchmodel b");
    }

    #[test]
    fn test_text_without_actions() {
        let template = CustomTemplate::parse("plain text").expect("Failed to parse");
        assert_eq!(template.render(&Bindings::default()), "plain text");
        assert!(template.variables().is_empty());
    }
}
