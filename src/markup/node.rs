use scraper::{ElementRef, Html};

/// Name given to the synthetic root wrapping a parsed document.
pub const DOCUMENT: &str = "#document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  Text(String),
}

impl Node {
  pub const fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(element) => Some(element),
      Self::Text(_) => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Element(_) => None,
      Self::Text(text) => Some(text),
    }
  }
}

/// Read-only markup tree. Children and attributes keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
  pub name: String,
  pub attributes: Vec<(String, String)>,
  pub children: Vec<Node>,
}

impl Element {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.push((key.into(), value.into()));
    self
  }

  #[must_use]
  pub fn with_child(mut self, child: impl Into<Node>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn with_text(self, text: impl Into<String>) -> Self {
    self.with_child(Node::Text(text.into()))
  }

  /// True for an element named `tag` carrying exactly `class="<class>"`.
  pub fn is(&self, tag: &str, class: &str) -> bool {
    self.name == tag && self.attributes.iter().any(|(k, v)| k == "class" && v == class)
  }

  pub fn first_child(&self) -> Option<&Node> {
    self.children.first()
  }

  pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
    self.children.iter().filter_map(Node::as_element)
  }

  /// Parses an HTML document into a tree rooted at a [`DOCUMENT`] element.
  pub fn parse_document(html: &str) -> Self {
    let document = Html::parse_document(html);

    Self::new(DOCUMENT).with_child(Self::from(document.root_element()))
  }
}

impl From<Element> for Node {
  fn from(element: Element) -> Self {
    Self::Element(element)
  }
}

impl From<ElementRef<'_>> for Element {
  fn from(element: ElementRef<'_>) -> Self {
    let value = element.value();

    let children = element
      .children()
      .filter_map(|child| {
        if let Some(child_element) = ElementRef::wrap(child) {
          return Some(Node::Element(Self::from(child_element)));
        }

        // comments, doctypes and processing instructions are dropped
        child.value().as_text().map(|text| Node::Text((**text).to_owned()))
      })
      .collect();

    Self {
      name: value.name().to_owned(),
      attributes: value
        .attrs()
        .map(|(key, val)| (key.to_owned(), val.to_owned()))
        .collect(),
      children,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_keeps_elements_and_text_only() {
    let root = Element::parse_document(
      r#"<!DOCTYPE html><html><body><!-- note --><div class="a" id="x">hi</div></body></html>"#,
    );

    assert_eq!(root.name, DOCUMENT);
    let html = root.child_elements().next().unwrap();
    assert_eq!(html.name, "html");

    let body = html.child_elements().find(|e| e.name == "body").unwrap();
    assert_eq!(body.children.len(), 1);

    let div = body.child_elements().next().unwrap();
    assert_eq!(div.attributes, vec![
      ("class".to_owned(), "a".to_owned()),
      ("id".to_owned(), "x".to_owned()),
    ]);
    assert_eq!(div.first_child().and_then(Node::as_text), Some("hi"));
  }

  #[test]
  fn class_match_is_exact() {
    let single = Element::new("div").with_attribute("class", "num");
    let multi = Element::new("div").with_attribute("class", "num big");

    assert!(single.is("div", "num"));
    assert!(!single.is("span", "num"));
    assert!(!multi.is("div", "num"));
  }

  #[test]
  fn parse_decodes_entities() {
    let root = Element::parse_document("<p>A&amp;B</p>");
    let html = root.child_elements().next().unwrap();
    let body = html.child_elements().find(|e| e.name == "body").unwrap();
    let p = body.child_elements().next().unwrap();

    assert_eq!(p.first_child().and_then(Node::as_text), Some("A&B"));
  }
}
