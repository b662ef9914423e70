use fsexplorer_tree::{
    filter, find, resolve, NodePatch, TreeError, TreeNode, TreeStore, WalkControl,
};

fn src_only() -> TreeStore {
    TreeStore::new(vec![TreeNode::folder("src")])
}

#[test]
fn create_then_delete_restores_empty_folder() {
    let mut store = src_only();
    store.create("src", TreeNode::file("index.js", "// js")).unwrap();
    assert_eq!(
        store.forest(),
        [TreeNode::folder_with(
            "src",
            vec![TreeNode::file("index.js", "// js")]
        )]
    );

    store.delete("src/index.js").unwrap();
    assert_eq!(store.forest(), [TreeNode::folder("src")]);
}

#[test]
fn created_file_is_found_at_joined_path() {
    let mut store = TreeStore::with_default_forest();
    store.create("/src/", TreeNode::folder("lib")).unwrap();
    store
        .create("src//lib", TreeNode::file("data.json", "{\"a\":1}"))
        .unwrap();

    let node = store.node("src/lib/data.json").expect("file should exist");
    assert_eq!(node, TreeNode::file("data.json", "{\"a\":1}"));
}

#[test]
fn deleting_missing_path_twice_is_stable() {
    let mut store = TreeStore::with_default_forest();
    let first = store.delete("src/ghost.txt");
    let after_first = store.snapshot();
    let second = store.delete("src/ghost.txt");

    assert_eq!(first, second);
    assert!(matches!(first, Err(TreeError::NotFound { .. })));
    assert_eq!(store.snapshot(), after_first);
}

#[test]
fn filter_scenario_drops_unrelated_folder() {
    let mut store = TreeStore::new(vec![TreeNode::folder("src"), TreeNode::folder("public")]);
    store.create("src", TreeNode::file("index.js", "// js")).unwrap();

    let filtered = store.filtered("index");
    assert_eq!(
        filtered,
        vec![TreeNode::folder_with(
            "src",
            vec![TreeNode::file("index.js", "// js")]
        )]
    );
    assert_eq!(store.forest().len(), 2);
}

#[test]
fn filtered_nodes_exist_in_original_with_same_content() {
    let mut store = TreeStore::with_default_forest();
    store.create("src", TreeNode::folder("components")).unwrap();
    store
        .create("src/components", TreeNode::file("Card.json", "{}"))
        .unwrap();
    store.create("public", TreeNode::file("card.txt", "hi")).unwrap();
    store.create("server", TreeNode::file("main.txt", "x")).unwrap();

    let original = store.forest().to_vec();
    let filtered = filter(&original, "card");
    let mut kept = 0;
    fsexplorer_tree::walk(&filtered, |path, node, _| {
        let source = find(&original, path).expect("kept node must exist in source");
        assert_eq!(source.content(), node.content());
        kept += 1;
        WalkControl::Continue
    });
    assert_eq!(kept, 5);
}

#[test]
fn update_changes_only_the_addressed_node() {
    let mut store = TreeStore::new(vec![
        TreeNode::folder_with(
            "src",
            vec![
                TreeNode::file("index.js", "// js"),
                TreeNode::file("other.js", "other"),
            ],
        ),
        TreeNode::folder_with("public", vec![TreeNode::file("index.js", "public")]),
    ]);

    store
        .update("src/index.js", NodePatch::content("updated"))
        .unwrap();

    assert_eq!(
        store.forest(),
        [
            TreeNode::folder_with(
                "src",
                vec![
                    TreeNode::file("index.js", "updated"),
                    TreeNode::file("other.js", "other"),
                ],
            ),
            TreeNode::folder_with("public", vec![TreeNode::file("index.js", "public")]),
        ]
    );
}

#[test]
fn snapshot_serialises_binary_content_as_base64() {
    let mut store = TreeStore::new(vec![TreeNode::folder("public")]);
    store
        .create("public", TreeNode::file("logo.png", vec![0x89, 0x50, 0x4e, 0x47]))
        .unwrap();

    let json = serde_json::to_string(store.forest()).unwrap();
    assert!(json.contains("\"content\":\"b64:iVBORw==\""), "{json}");
    let back: Vec<TreeNode> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, store.forest());
    assert!(find(&back, &resolve("public/logo.png")).is_some());
}
