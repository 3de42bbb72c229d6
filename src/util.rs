use scraper::{ElementRef, Node};

/// All descendant text, trimmed.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Only the text nodes that are direct children of `element`.
pub fn own_text(element: ElementRef) -> String {
    let mut s = String::new();
    for node in element.children() {
        if let Node::Text(text) = node.value() {
            s.push_str(text);
        }
    }
    s
}

/// Following sibling elements with the given tag name.
pub fn next_siblings_named<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == name)
}

#[inline]
pub fn zero_pad(id: u16) -> String {
    format!("{id:03}")
}
