//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::NodeRef;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status indented (green checkmark with leading spaces)
pub fn success_detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line label for a node: type tag followed by quoted values.
pub fn node_label(node: &NodeRef<'_>, show_values: bool) -> String {
    let values = node.values().iter().map(|v| quote(v)).join(" ");
    match (node.node_type(), values.is_empty() || !show_values) {
        ("", false) => values,
        ("", true) => "·".to_string(),
        (ty, true) => ty.to_string(),
        (ty, false) => format!("{} {}", ty, values),
    }
}

fn quote(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

type Frame<'a> = (Tree<String>, std::vec::IntoIter<NodeRef<'a>>, usize);

fn frame<'a>(node: &NodeRef<'a>, level: usize, max_depth: Option<usize>, show_values: bool) -> Frame<'a> {
    let children: Vec<_> = if max_depth.is_some_and(|max| level >= max) {
        Vec::new()
    } else {
        node.children().collect()
    };
    (Tree::new(node_label(node, show_values)), children.into_iter(), level)
}

/// Build a printable tree below `node`, stopping after `max_depth` levels.
pub fn render_tree(node: &NodeRef<'_>, max_depth: Option<usize>, show_values: bool) -> Tree<String> {
    // A frame is popped once its children are exhausted and its subtree
    // moves into the frame below.
    let mut stack = vec![frame(node, 0, max_depth, show_values)];
    loop {
        let next = stack
            .last_mut()
            .and_then(|(_, children, level)| children.next().map(|child| (child, *level + 1)));
        if let Some((child, level)) = next {
            stack.push(frame(&child, level, max_depth, show_values));
            continue;
        }
        let Some((done, _, _)) = stack.pop() else {
            unreachable!("render stack starts non-empty");
        };
        match stack.last_mut() {
            Some((parent, _, _)) => {
                parent.push(done);
            }
            None => return done,
        }
    }
}
