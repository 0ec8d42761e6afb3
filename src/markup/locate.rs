use crate::error::{Error, ErrorKind};

use super::{Element, Node};

/// Depth-first, pre-order search for the first `<tag class="<class>">`, starting with `root` itself.
pub fn find_first<'a>(root: &'a Element, tag: &str, class: &str) -> Option<&'a Element> {
  if root.is(tag, class) {
    return Some(root);
  }

  root.child_elements().find_map(|child| find_first(child, tag, class))
}

/// Every `<tag class="<class>">` below `root` in document order.
///
/// A matching element is not searched further, so matches nested inside
/// another match are not reported.
pub fn find_all<'a>(root: &'a Element, tag: &str, class: &str) -> Vec<&'a Element> {
  let mut found = Vec::new();
  collect_matching(root, &|element| element.is(tag, class), &mut found);
  found
}

/// The first child text of every `<tag>` element below `root`, in document order.
///
/// # Errors
/// Returns an error if a matched element does not start with a text node.
pub fn collect_text<'a>(root: &'a Element, tag: &str) -> Result<Vec<&'a str>, Error> {
  let mut found = Vec::new();
  collect_matching(root, &|element| element.name == tag, &mut found);

  found.into_iter().map(first_text).collect()
}

/// Text of the first child of `element`.
///
/// # Errors
/// Returns an error if the first child is missing or is not text.
pub fn first_text(element: &Element) -> Result<&str, Error> {
  match element.first_child() {
    Some(Node::Text(text)) => Ok(text),
    Some(Node::Element(child)) => Err(Error::new(
      ErrorKind::MissingText,
      format!("<{}> starts with <{}> instead of text", element.name, child.name),
    )),
    None => Err(Error::new(
      ErrorKind::MissingText,
      format!("<{}> is empty", element.name),
    )),
  }
}

fn collect_matching<'a>(
  element: &'a Element,
  predicate: &dyn Fn(&Element) -> bool,
  found: &mut Vec<&'a Element>,
) {
  if predicate(element) {
    found.push(element);
    return;
  }

  for child in element.child_elements() {
    collect_matching(child, predicate, found);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn div(class: &str) -> Element {
    Element::new("div").with_attribute("class", class)
  }

  fn tree() -> Element {
    Element::new("body")
      .with_child(div("wrap")
        .with_child(div("slide").with_text("2024.2"))
        .with_child(div("other").with_child(div("slide").with_text("2024.3"))))
      .with_child(div("slide").with_text("2024.4"))
  }

  #[test]
  fn find_first_is_pre_order() {
    let root = tree();

    let first = find_first(&root, "div", "slide").unwrap();
    assert_eq!(first_text(first), Ok("2024.2"));
  }

  #[test]
  fn find_first_matches_root() {
    let root = div("slide");

    assert!(std::ptr::eq(find_first(&root, "div", "slide").unwrap(), &root));
  }

  #[test]
  fn find_first_not_found() {
    let root = tree();

    assert!(find_first(&root, "div", "missing").is_none());
    assert!(find_first(&root, "span", "slide").is_none());
  }

  #[test]
  fn find_all_in_document_order() {
    let root = tree();

    let labels: Vec<_> = find_all(&root, "div", "slide")
      .into_iter()
      .map(|e| first_text(e).unwrap())
      .collect();

    assert_eq!(labels, ["2024.2", "2024.3", "2024.4"]);
  }

  #[test]
  fn find_all_skips_nested_matches() {
    let root = div("item").with_child(div("item").with_text("inner"));

    assert_eq!(find_all(&root, "div", "item").len(), 1);
  }

  #[test]
  fn find_all_empty() {
    assert!(find_all(&tree(), "div", "nope").is_empty());
  }

  #[test]
  fn find_all_handles_deep_nesting() {
    let mut root = div("leaf").with_text("deep");
    for _ in 0..200 {
      root = Element::new("section").with_child(root);
    }

    assert_eq!(find_all(&root, "div", "leaf").len(), 1);
  }

  #[test]
  fn collect_text_reads_first_child_only() {
    let root = Element::new("div")
      .with_child(Element::new("p").with_text("10:00〜朝の会").with_text("ignored"))
      .with_child(Element::new("span").with_child(Element::new("p").with_text("お休み")));

    assert_eq!(collect_text(&root, "p"), Ok(vec!["10:00〜朝の会", "お休み"]));
  }

  #[test]
  fn collect_text_rejects_element_first_child() {
    let root = Element::new("div")
      .with_child(Element::new("p").with_child(Element::new("a").with_text("link")));

    let error = collect_text(&root, "p").unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingText);
  }

  #[test]
  fn collect_text_rejects_empty_element() {
    let root = Element::new("div").with_child(Element::new("p"));

    assert_eq!(collect_text(&root, "p").unwrap_err().kind, ErrorKind::MissingText);
  }
}
