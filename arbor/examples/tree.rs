//! Builds a small directory tree, drives it with keys and prints the
//! visible rows after each step.

use std::fs::File;

use arbor::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Clone, Debug, PartialEq)]
struct Dir {
    path: String,
    children: Vec<Dir>,
}

impl Dir {
    fn new(path: &str, children: Vec<Dir>) -> Self {
        Self {
            path: path.to_string(),
            children,
        }
    }

    fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl TreeItem for Dir {
    fn id(&self) -> String {
        self.path.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

fn main() -> Result<(), TreeError> {
    // Set up file logging
    let log_file = File::create("tree.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let root = Dir::new(
        "/src",
        vec![
            Dir::new(
                "/src/components",
                vec![Dir::new("/src/components/tree", vec![]), Dir::new("/src/components/editor", vec![])],
            ),
            Dir::new("/src/animation", vec![Dir::new("/src/animation/player", vec![])]),
        ],
    );
    let config = TreeConfig::new()
        .selection(SelectionMode::Cascading)
        .single_branch_expand();
    let mut tree = Tree::with_items_and_config(vec![root], config)?;

    tree.on_node_expanding(|args| {
        // Keep the animation folder shut
        args.cancel = args.node == "/src/animation";
    });
    tree.on_node_selection(|args| println!("  selection +{:?} -{:?}", args.added, args.removed));

    let script = [
        Key::Down,
        Key::Right,
        Key::Down,
        Key::Right,
        Key::Down,
        Key::Char(' '),
        Key::Down,
        Key::Char(' '),
        Key::Down,
        Key::Right,
    ];
    for key in script {
        let result = tree.on_key(&KeyCombo::key(key));
        println!("{:?} -> {:?}", key, result);
        print(&tree)?;
    }
    Ok(())
}

fn print(tree: &Tree<Dir>) -> Result<(), TreeError> {
    let active = tree.active();
    for id in tree.visible_nodes()? {
        let (Some(dir), Some(level)) = (tree.data(&id), tree.level(&id)) else {
            continue;
        };
        let marker = if active.as_ref() == Some(&id) { ">" } else { " " };
        let check = if tree.is_selected(&id)? {
            "[x]"
        } else if tree.is_indeterminate(&id)? {
            "[-]"
        } else {
            "[ ]"
        };
        let icon = match (dir.children.is_empty(), tree.is_expanded(&id)?) {
            (true, _) => " ",
            (false, true) => "v",
            (false, false) => ">",
        };
        println!("{} {}{} {} {}", marker, "  ".repeat(level), icon, check, dir.name());
    }
    Ok(())
}
