//! HTML page generation.
//!
//! Uses `quick-xml`'s writer API, so every text node and attribute value is
//! escaped on the way out. Pages are polyglot XHTML: void elements are
//! written self-closed.

use std::io::Cursor;

use axum::response::Html;
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

/// Site-wide navigation, in display order.
const NAV: &[(&str, &str)] = &[
  ("/", "Home"),
  ("/admin", "Admin"),
  ("/regions", "Regions"),
  ("/subregions", "Sub-Regions"),
  ("/intermediate-regions", "Intermediate Regions"),
  ("/feature1", "Country Trend"),
  ("/feature2", "Sub-Region & Decade"),
  ("/feature3", "Region & Decade"),
  ("/feature4", "Search"),
  ("/feature8", "Summary"),
];

pub struct PageWriter {
  writer: Writer<Cursor<Vec<u8>>>,
}

fn render_err(e: impl std::fmt::Display) -> Error {
  Error::Render(e.to_string())
}

impl PageWriter {
  /// Start a page: document head, navigation and the `<h1>` title.
  pub fn new(title: &str) -> Result<Self, Error> {
    let mut page = Self { writer: Writer::new(Cursor::new(Vec::new())) };

    page
      .writer
      .write_event(Event::DocType(BytesText::from_escaped("html")))
      .map_err(render_err)?;
    page.open("html", &[("lang", "en")])?;
    page.open("head", &[])?;
    page.empty("meta", &[("charset", "utf-8")])?;
    page.element("title", &[], title)?;
    page.empty("link", &[("rel", "stylesheet"), ("href", "/public/style.css")])?;
    page.close("head")?;
    page.open("body", &[])?;

    page.open("nav", &[])?;
    for (href, label) in NAV {
      page.link(href, label)?;
      page.text(" ")?;
    }
    page.close("nav")?;

    page.open("main", &[])?;
    page.element("h1", &[], title)?;
    Ok(page)
  }

  pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, Error> {
    let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
    self.writer.write_event(Event::Start(start)).map_err(render_err)?;
    Ok(self)
  }

  pub fn close(&mut self, tag: &str) -> Result<&mut Self, Error> {
    self.writer.write_event(Event::End(BytesEnd::new(tag))).map_err(render_err)?;
    Ok(self)
  }

  /// A void element such as `<input/>`.
  pub fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, Error> {
    let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
    self.writer.write_event(Event::Empty(start)).map_err(render_err)?;
    Ok(self)
  }

  pub fn text(&mut self, text: &str) -> Result<&mut Self, Error> {
    self.writer.write_event(Event::Text(BytesText::new(text))).map_err(render_err)?;
    Ok(self)
  }

  /// `<tag attrs>text</tag>`
  pub fn element(
    &mut self,
    tag:   &str,
    attrs: &[(&str, &str)],
    text:  &str,
  ) -> Result<&mut Self, Error> {
    self.open(tag, attrs)?.text(text)?.close(tag)
  }

  pub fn link(&mut self, href: &str, text: &str) -> Result<&mut Self, Error> {
    self.element("a", &[("href", href)], text)
  }

  /// Open a table and write its header row; close with [`end_table`](Self::end_table).
  pub fn start_table(&mut self, headers: &[&str]) -> Result<&mut Self, Error> {
    self.open("table", &[])?.open("thead", &[])?.open("tr", &[])?;
    for h in headers {
      self.element("th", &[], h)?;
    }
    self.close("tr")?.close("thead")?.open("tbody", &[])
  }

  /// A row of plain-text cells.
  pub fn row<T: AsRef<str>>(&mut self, cells: &[T]) -> Result<&mut Self, Error> {
    self.open("tr", &[])?;
    for c in cells {
      self.element("td", &[], c.as_ref())?;
    }
    self.close("tr")
  }

  pub fn end_table(&mut self) -> Result<&mut Self, Error> {
    self.close("tbody")?.close("table")
  }

  /// Paragraph shown in place of a table with no rows.
  pub fn empty_notice(&mut self, text: &str) -> Result<&mut Self, Error> {
    self.element("p", &[("class", "empty")], text)
  }

  /// A labelled `<select>` whose options are `(value, label)` pairs. The
  /// option equal to `selected` is marked; `placeholder` is an empty-valued
  /// first option.
  pub fn select<I>(
    &mut self,
    name:        &str,
    label:       &str,
    placeholder: &str,
    options:     I,
    selected:    &str,
  ) -> Result<&mut Self, Error>
  where
    I: IntoIterator<Item = (String, String)>,
  {
    self.open("label", &[])?.text(label)?.text(" ")?;
    self.open("select", &[("name", name)])?;
    self.element("option", &[("value", "")], placeholder)?;
    for (value, text) in options {
      if value == selected {
        self.element("option", &[("value", value.as_str()), ("selected", "selected")], &text)?;
      } else {
        self.element("option", &[("value", value.as_str())], &text)?;
      }
    }
    self.close("select")?.close("label")
  }

  /// A one-button POST form, used for delete actions.
  pub fn post_button(&mut self, action: &str, label: &str) -> Result<&mut Self, Error> {
    self.open("form", &[("method", "post"), ("action", action), ("class", "inline")])?;
    self.element("button", &[("type", "submit")], label)?;
    self.close("form")
  }

  pub fn finish(mut self) -> Result<Html<String>, Error> {
    self.close("main")?.close("body")?.close("html")?;
    let bytes = self.writer.into_inner().into_inner();
    String::from_utf8(bytes).map(Html).map_err(render_err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn body(page: PageWriter) -> String {
    page.finish().unwrap().0
  }

  #[test]
  fn page_has_title_and_nav() {
    let html = body(PageWriter::new("Region List").unwrap());
    assert!(html.starts_with("<!DOCTYPE html>"), "{html}");
    assert!(html.contains("<title>Region List</title>"));
    assert!(html.contains("<h1>Region List</h1>"));
    assert!(html.contains(r#"<a href="/feature8">Summary</a>"#));
    assert!(html.ends_with("</main></body></html>"));
  }

  #[test]
  fn text_and_attributes_are_escaped() {
    let mut page = PageWriter::new("t").unwrap();
    page.element("td", &[("title", "a\"b")], "<b>&").unwrap();
    let html = body(page);
    assert!(html.contains("&lt;b&gt;&amp;"), "{html}");
    assert!(html.contains("title=\"a&quot;b\""), "{html}");
  }

  #[test]
  fn select_marks_current_option() {
    let mut page = PageWriter::new("t").unwrap();
    page
      .select(
        "decade",
        "Decade",
        "-- choose --",
        vec![("1990".into(), "1990".into()), ("2000".into(), "2000".into())],
        "2000",
      )
      .unwrap();
    let html = body(page);
    assert!(html.contains(r#"<option value="1990">1990</option>"#), "{html}");
    assert!(html.contains(r#"<option value="2000" selected="selected">2000</option>"#), "{html}");
  }
}
