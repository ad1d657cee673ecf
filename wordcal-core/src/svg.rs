//! Minimal SVG document tree and its textual serialization.
use std::collections::BTreeMap;
use std::fmt;

const SVG_XMLNS: &str = "http://www.w3.org/2000/svg";

/// The `<svg>` root element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SvgDocument {
    pub width: i32,
    pub height: i32,
    pub children: Vec<SvgNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgNode {
    Group(Group),
    Rect(Rect),
    Text(Text),
}

/// A `<g>` element. Groups only pass attributes down, so they are kept as a
/// free-form (sorted) attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<SvgNode>,
}

impl Group {
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SvgNode>) -> Self {
        self.children = children;
        self
    }
}

/// A `<rect>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub rx: Option<i32>,
    pub ry: Option<i32>,
}

/// A `<text>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

impl From<Group> for SvgNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Rect> for SvgNode {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<Text> for SvgNode {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
        )?;
        writeln!(
            f,
            r#"<svg xmlns="{SVG_XMLNS}" width="{}" height="{}">"#,
            self.width, self.height
        )?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        writeln!(f, "</svg>")
    }
}

impl fmt::Display for SvgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(group) => write_group(f, group),
            Self::Rect(rect) => write_rect(f, rect),
            Self::Text(text) => writeln!(
                f,
                r#"<text x="{}" y="{}">{}</text>"#,
                text.x,
                text.y,
                escape(&text.text)
            ),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &Group) -> fmt::Result {
    f.write_str("<g")?;
    for (name, value) in &group.attributes {
        write!(f, r#" {name}="{}""#, escape(value))?;
    }
    writeln!(f, ">")?;
    for child in &group.children {
        write!(f, "{child}")?;
    }
    writeln!(f, "</g>")
}

fn write_rect(f: &mut fmt::Formatter<'_>, rect: &Rect) -> fmt::Result {
    write!(
        f,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        rect.x, rect.y, rect.width, rect.height
    )?;
    if let Some(rx) = rect.rx {
        write!(f, r#" rx="{rx}""#)?;
    }
    if let Some(ry) = rect.ry {
        write!(f, r#" ry="{ry}""#)?;
    }
    writeln!(f, "/>")
}

/// Escape text for use in XML content or a double-quoted attribute.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_tree() {
        let doc = SvgDocument {
            width: 100,
            height: 50,
            children: vec![
                Group::default()
                    .with_attribute("style", "fill:white")
                    .with_attribute("font-size", "12")
                    .with_children(vec![
                        Rect {
                            x: 1,
                            y: 2,
                            width: 3,
                            height: 4,
                            rx: Some(5),
                            ry: Some(5),
                        }
                        .into(),
                        Text {
                            x: 6,
                            y: 7,
                            text: "12".into(),
                        }
                        .into(),
                    ])
                    .into(),
            ],
        };
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\">\n",
            "<g font-size=\"12\" style=\"fill:white\">\n",
            "<rect x=\"1\" y=\"2\" width=\"3\" height=\"4\" rx=\"5\" ry=\"5\"/>\n",
            "<text x=\"6\" y=\"7\">12</text>\n",
            "</g>\n",
            "</svg>\n",
        );
        assert_eq!(doc.to_string(), expected);
    }

    #[test]
    fn rect_without_roundness_omits_radii() {
        let node = SvgNode::from(Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
            rx: None,
            ry: None,
        });
        assert_eq!(
            node.to_string(),
            "<rect x=\"0\" y=\"0\" width=\"10\" height=\"10\"/>\n"
        );
    }

    #[test]
    fn escapes_attribute_values_and_text() {
        let group = Group::default()
            .with_attribute("font-family", "\"Fira\" & <Co>")
            .with_children(vec![
                Text {
                    x: 0,
                    y: 0,
                    text: "a<b".into(),
                }
                .into(),
            ]);
        let markup = SvgNode::from(group).to_string();
        assert!(markup.contains("font-family=\"&quot;Fira&quot; &amp; &lt;Co&gt;\""));
        assert!(markup.contains(">a&lt;b</text>"));
    }
}
