use rover::config::{ContentMode, RoverConfig};
use rover::navigation::Navigation;
use rover::tree::{count_files, NavNode, NavigationStats};
use serde_json::json;
use tempfile::TempDir;

use crate::integration::support::{sorted_config, write_files};

fn scan(temp: &TempDir, config: &RoverConfig) -> Navigation {
    Navigation::from_config(&config.content, temp.path()).unwrap()
}

#[test]
fn lesson_directory_mirrors_as_tree() {
    let temp = TempDir::new().unwrap();
    write_files(
        &temp.path().join("templates"),
        &[
            ("algorithms/search.html", "<html></html>"),
            ("algorithms/sorting.html", "<html></html>"),
            ("intro.html", "<html></html>"),
            ("notes.txt", "ignored"),
        ],
    );

    let navigation = scan(&temp, &sorted_config());
    let snapshot = navigation.snapshot();
    assert_eq!(
        serde_json::to_value(&snapshot.navigation).unwrap(),
        json!([
            {
                "type": "folder",
                "name": "algorithms",
                "path": "algorithms",
                "children": [
                    {"type": "file", "name": "search", "path": "algorithms/search.html", "url": "/view/algorithms/search.html"},
                    {"type": "file", "name": "sorting", "path": "algorithms/sorting.html", "url": "/view/algorithms/sorting.html"}
                ]
            },
            {"type": "file", "name": "intro", "path": "intro.html", "url": "/view/intro.html"}
        ])
    );
    assert_eq!(
        NavigationStats::from_tree(&snapshot.navigation),
        NavigationStats {
            categories: 2,
            resources: 3
        }
    );
}

#[test]
fn deep_paths_and_spaces_are_encoded_per_segment() {
    let temp = TempDir::new().unwrap();
    write_files(
        &temp.path().join("templates"),
        &[("data structures/trees/red black.html", "<html></html>")],
    );

    let snapshot = scan(&temp, &sorted_config()).snapshot();
    let NavNode::Folder(top) = &snapshot.navigation[0] else {
        panic!("expected folder");
    };
    assert_eq!(top.name, "data structures");
    let NavNode::Folder(trees) = &top.children[0] else {
        panic!("expected folder");
    };
    assert_eq!(trees.path, "data structures/trees");
    let NavNode::File(file) = &trees.children[0] else {
        panic!("expected file");
    };
    assert_eq!(file.name, "red black");
    assert_eq!(file.url, "/view/data%20structures/trees/red%20black.html");
}

#[test]
fn react_mode_scans_both_roots_and_skips_excluded_dirs() {
    let temp = TempDir::new().unwrap();
    write_files(
        temp.path(),
        &[
            ("rover-react/src/content/lessons/Intro.jsx", "x"),
            ("rover-react/src/content/lessons/Graph.tsx", "x"),
            ("rover-react/src/content/node_modules/react/index.js", "x"),
            ("rover-react/src/content/build/bundle.js", "x"),
            ("templates/lessons/legacy.html", "x"),
        ],
    );
    let mut config = sorted_config();
    config.content.mode = ContentMode::React;

    let snapshot = scan(&temp, &config).snapshot();
    // One "lessons" folder per root, never merged across roots
    assert_eq!(snapshot.navigation.len(), 2);
    assert_eq!(snapshot.navigation[0].children().len(), 2);
    assert_eq!(count_files(&snapshot.navigation), 3);
    assert_eq!(
        snapshot.navigation[1].children()[0],
        NavNode::File(rover::tree::FileNode {
            name: "legacy".to_string(),
            path: "lessons/legacy.html".to_string(),
            url: "/content/lessons/legacy.html".to_string(),
        })
    );
}

#[test]
fn custom_extensions_accept_leading_dots() {
    let temp = TempDir::new().unwrap();
    write_files(
        &temp.path().join("templates"),
        &[("a.md", "x"), ("b.html", "x"), ("c.txt", "x")],
    );
    let mut config = sorted_config();
    config.content.extensions = vec![".md".to_string(), "txt".to_string()];

    let snapshot = scan(&temp, &config).snapshot();
    let names: Vec<&str> = snapshot.navigation.iter().map(NavNode::name).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn refresh_reflects_deletions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("templates");
    write_files(&root, &[("a/one.html", "x"), ("a/two.html", "x")]);

    let navigation = scan(&temp, &sorted_config());
    assert_eq!(count_files(&navigation.snapshot().navigation), 2);

    std::fs::remove_dir_all(root.join("a")).unwrap();
    let snapshot = navigation.refresh().unwrap();
    assert!(snapshot.navigation.is_empty());
    assert_eq!(snapshot.generation, 2);
}
