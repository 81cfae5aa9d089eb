use regex::Regex;
use std::sync::OnceLock;

/// A markdown heading: `#` count and the trimmed title text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// One entry of the derived outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineNode {
    pub text: String,
    pub children: Vec<OutlineNode>,
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*)$").expect("valid heading pattern"))
}

/// Collect `#`..`######` headings (up to three leading spaces allowed) in
/// document order.
pub fn scan_headings(markdown: &str) -> Vec<Heading> {
    let re = heading_re();
    markdown
        .lines()
        .filter_map(|line| {
            re.captures(line).map(|caps| Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            })
        })
        .collect()
}

/// Fold a flat heading list into a tree. A stack of (level, container)
/// pairs is seeded with a level-0 sentinel; a heading closes out every
/// branch at its own level or deeper, then nests under whatever remains.
pub fn build_outline(headings: &[Heading]) -> Vec<OutlineNode> {
    let mut stack: Vec<(u8, Vec<OutlineNode>)> = vec![(0, Vec::new())];

    for heading in headings {
        while stack.len() > 1 && stack.last().is_some_and(|(level, _)| heading.level <= *level) {
            close_top(&mut stack);
        }
        if let Some((_, container)) = stack.last_mut() {
            container.push(OutlineNode {
                text: heading.text.clone(),
                children: Vec::new(),
            });
        }
        stack.push((heading.level, Vec::new()));
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().map(|(_, roots)| roots).unwrap_or_default()
}

/// Pop the top container and attach it as the children of the most recent
/// item one level up. The sentinel is never popped.
fn close_top(stack: &mut Vec<(u8, Vec<OutlineNode>)>) {
    if stack.len() < 2 {
        return;
    }
    if let Some((_, children)) = stack.pop() {
        if let Some((_, parent)) = stack.last_mut() {
            if let Some(item) = parent.last_mut() {
                item.children = children;
            }
        }
    }
}

/// Preorder flattening into (depth, text) rows for list rendering.
pub fn flatten(nodes: &[OutlineNode]) -> Vec<(usize, String)> {
    let mut rows = Vec::new();
    fn walk(nodes: &[OutlineNode], depth: usize, rows: &mut Vec<(usize, String)>) {
        for node in nodes {
            rows.push((depth, node.text.clone()));
            walk(&node.children, depth + 1, rows);
        }
    }
    walk(nodes, 0, &mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(md: &str) -> Vec<OutlineNode> {
        build_outline(&scan_headings(md))
    }

    #[test]
    fn siblings_and_children_fold_correctly() {
        let tree = outline("# A\n## B\n## C\n# D");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].text, "A");
        assert_eq!(tree[1].text, "D");
        let a_children: Vec<_> = tree[0].children.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(a_children, ["B", "C"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn deeper_levels_nest_under_most_recent_shallower() {
        let tree = outline("# Top\n### Deep\n## Mid");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].text, "Deep");
        assert_eq!(tree[0].children[1].text, "Mid");
    }

    #[test]
    fn heading_syntax_edges() {
        // Up to three leading spaces is a heading; four is code.
        assert_eq!(scan_headings("   # Indented").len(), 1);
        assert!(scan_headings("    # Code block").is_empty());
        // Seven hashes is not a heading, and the space is mandatory.
        assert!(scan_headings("####### Too deep").is_empty());
        assert!(scan_headings("#NoSpace").is_empty());
        // CRLF input still scans.
        assert_eq!(scan_headings("# A\r\n## B\r\n").len(), 2);
    }

    #[test]
    fn heading_text_is_trimmed() {
        let headings = scan_headings("##   Spaced out   ");
        assert_eq!(headings[0].text, "Spaced out");
        assert_eq!(headings[0].level, 2);
    }

    #[test]
    fn no_headings_yields_empty_tree() {
        assert!(outline("just prose\n\n- a list\n").is_empty());
    }

    #[test]
    fn flatten_preserves_preorder_and_depth() {
        let rows = flatten(&outline("# A\n## B\n### C\n# D"));
        let expect = [
            (0, "A".to_string()),
            (1, "B".to_string()),
            (2, "C".to_string()),
            (0, "D".to_string()),
        ];
        assert_eq!(rows, expect);
    }
}
