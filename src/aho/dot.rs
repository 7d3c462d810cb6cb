use std::io::Write;

use super::automaton::Automaton;
use super::char_trait::AhoChar;

/// Writes `automaton` as a Graphviz `digraph`.
///
/// Transitions are drawn as solid blue edges labelled with their symbol, fail links
/// as dashed red edges and terminal links as dotted green edges. Node labels list
/// the node's outputs.
///
/// # Examples
///
/// ```
/// use libaho::aho::{dot::write_dot, Automaton};
///
/// let automaton = Automaton::new(["ab", "b"]).unwrap();
/// let mut buffer = Vec::new();
/// write_dot(&automaton, &mut buffer).unwrap();
/// let dot = String::from_utf8(buffer).unwrap();
/// assert!(dot.starts_with("digraph automaton {"));
/// ```
pub fn write_dot<C: AhoChar>(
    automaton: &Automaton<C>,
    mut writer: impl Write,
) -> std::io::Result<()> {
    writeln!(writer, "digraph automaton {{")?;
    writeln!(writer, "  node [shape=box];")?;

    for node in automaton.nodes() {
        let outputs: Vec<String> = node.outputs().iter().map(|p| p.to_string()).collect();
        let mut label = format!("{}\\noutputs: [{}]", node.id(), outputs.join(", "));
        if let Some(fail) = node.fail() {
            label.push_str(&format!("\\nfail: {}", fail.id()));
        }
        if let Some(terminal) = node.terminal() {
            label.push_str(&format!("\\nterminal: {}", terminal.id()));
        }
        let shape = if node.outputs().is_empty() { "" } else { ", peripheries=2" };
        writeln!(writer, "  {} [label=\"{}\"{}];", node.id(), label, shape)?;
    }

    for node in automaton.nodes() {
        for (symbol, child) in node.transitions() {
            writeln!(
                writer,
                "  {} -> {} [label=\"{}\", color=blue];",
                node.id(),
                child,
                escape(&format!("{symbol:?}"))
            )?;
        }
        if let Some(fail) = node.fail().filter(|fail| !fail.is_root()) {
            writeln!(writer, "  {} -> {} [color=red, style=dashed];", node.id(), fail.id())?;
        }
        if let Some(terminal) = node.terminal() {
            writeln!(writer, "  {} -> {} [color=green, style=dotted];", node.id(), terminal.id())?;
        }
    }

    writeln!(writer, "}}")
}

/// Escapes a string for use inside a double-quoted DOT label.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod test {
    use super::*;

    fn render<C: AhoChar>(automaton: &Automaton<C>) -> String {
        let mut buffer = Vec::new();
        write_dot(automaton, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn edges_for_every_link() {
        let automaton = Automaton::new(["he", "she"]).unwrap();
        let dot = render(&automaton);

        // root -h-> 1 -e-> 2, root -s-> 3 -h-> 4 -e-> 5
        assert!(dot.contains("0 -> 1 [label=\"'h'\", color=blue];"));
        assert!(dot.contains("4 -> 5 [label=\"'e'\", color=blue];"));
        assert!(dot.contains("4 -> 1 [color=red, style=dashed];"));
        assert!(dot.contains("5 -> 2 [color=red, style=dashed];"));
        assert!(dot.contains("5 -> 2 [color=green, style=dotted];"));
        assert!(dot.contains("2 [label=\"2\\noutputs: [0]\\nfail: 0\", peripheries=2];"));
        assert!(dot.trim_end().ends_with('}'));

        // Fail links to the root are implied and not drawn.
        assert!(!dot.contains("1 -> 0"));
    }

    #[test]
    fn labels_are_escaped() {
        let automaton = Automaton::new(["\"\\"]).unwrap();
        let dot = render(&automaton);
        assert!(dot.contains(r#"0 -> 1 [label="'\"'", color=blue];"#));
        assert!(dot.contains(r#"1 -> 2 [label="'\\\\'", color=blue];"#));
    }

    #[test]
    fn byte_automaton() {
        let automaton = Automaton::new([[1u8, 2]]).unwrap();
        let dot = render(&automaton);
        assert!(dot.contains("0 -> 1 [label=\"1\", color=blue];"));
    }
}
