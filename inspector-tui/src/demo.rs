//! Built-in sample tree shown when no snapshot file is given.

use inspector_lib::node::Node;
use inspector_lib::store::TreeSnapshot;

pub fn snapshot() -> TreeSnapshot {
    let nodes = vec![
        Node::new("app", "App")
            .with_decoration("root")
            .with_attribute("addr", "0x7f3a00")
            .with_child("theme"),
        Node::new("theme", "Theme")
            .with_decoration("theme")
            .with_attribute("mode", "dark")
            .with_child("scaffold")
            .with_expanded(true),
        Node::new("scaffold", "Scaffold")
            .with_decoration("container")
            .with_attribute("addr", "0x7f3a40")
            .with_children(["header", "body", "footer"])
            .with_expanded(true),
        Node::new("header", "Row")
            .with_decoration("row")
            .with_attribute("id", "header")
            .with_children(["logo", "title", "menu-button"]),
        Node::new("logo", "Image")
            .with_decoration("image")
            .with_attribute("src", "logo.png"),
        Node::new("title", "Text")
            .with_decoration("text")
            .with_attribute("id", "title")
            .with_attribute("content", "Element Inspector"),
        Node::new("menu-button", "Button")
            .with_decoration("button")
            .with_attribute("id", "menu")
            .with_child("menu-label"),
        Node::new("menu-label", "Text")
            .with_decoration("text")
            .with_attribute("content", "Menu"),
        Node::new("body", "ScrollView")
            .with_decoration("scroll")
            .with_attribute("id", "content")
            .with_child("list"),
        Node::new("list", "Column")
            .with_decoration("column")
            .with_children(["item-1", "item-2", "item-3"]),
        Node::new("item-1", "Padding")
            .with_decoration("padding")
            .with_attribute("addr", "0x7f3b10")
            .with_child("item-1-text"),
        Node::new("item-1-text", "Text")
            .with_decoration("text")
            .with_attribute("content", "First"),
        Node::new("item-2", "Padding")
            .with_decoration("padding")
            .with_attribute("addr", "0x7f3b50")
            .with_child("item-2-text"),
        Node::new("item-2-text", "Text")
            .with_decoration("text")
            .with_attribute("content", "Second"),
        Node::new("item-3", "GestureDetector")
            .with_decoration("gesture")
            .with_child("item-3-input"),
        Node::new("item-3-input", "TextField")
            .with_decoration("input")
            .with_attribute("id", "search-box"),
        Node::new("footer", "Align")
            .with_decoration("align")
            .with_child("footer-text"),
        Node::new("footer-text", "Text")
            .with_decoration("text")
            .with_attribute("content", "v0.1"),
    ];
    TreeSnapshot {
        root: Some("app".into()),
        nodes,
    }
}
