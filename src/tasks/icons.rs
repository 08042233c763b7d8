// src/tasks/icons.rs

//! SVG files → one stacked `<symbol>` sprite.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::tasks::{TaskContext, TaskReport, file_stem};
use crate::types::AssetCategory;

/// File name of the packed sprite inside the icons output directory.
pub const SPRITE_FILE: &str = "sprite.svg";

/// Root attributes that describe the standalone document rather than the
/// drawing, and so are not carried onto the `<symbol>`.
const DROPPED_ATTRIBUTES: &[&str] = &["width", "height", "id", "version", "x", "y"];

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let out_dir = ctx.output_dir(AssetCategory::Icons)?;
    let mut icons = Vec::new();

    for path in ctx.sources(AssetCategory::Icons)? {
        let text = ctx.fs.read_to_string(&path)?;
        icons.push(Icon::parse(&file_stem(&path)?, &text).with_context(|| format!("{:?}", path))?);
    }

    let target = out_dir.join(SPRITE_FILE);
    ctx.fs.write(&target, pack_sprite(&icons).as_bytes())?;

    let mut report = TaskReport::default();
    report.record(&target);
    Ok(report)
}

/// One source SVG reduced to what its `<symbol>` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub id: String,
    /// Carried-over root attributes, already escaped, in document order.
    pub attributes: Vec<(String, String)>,
    /// Raw markup between `<svg>` and `</svg>`.
    pub body: String,
}

impl Icon {
    pub fn parse(id: &str, svg: &str) -> Result<Self> {
        let mut reader = Reader::from_str(svg);

        loop {
            match reader.read_event()? {
                Event::Start(start) if start.local_name().as_ref() == b"svg" => {
                    let attributes = symbol_attributes(&start)?;
                    let end = start.to_end().into_owned();
                    let body = reader.read_text(end.name())?.trim().to_string();
                    return Ok(Self {
                        id: id.to_string(),
                        attributes,
                        body,
                    });
                }
                Event::Empty(start) if start.local_name().as_ref() == b"svg" => {
                    return Ok(Self {
                        id: id.to_string(),
                        attributes: symbol_attributes(&start)?,
                        body: String::new(),
                    });
                }
                Event::Eof => bail!("no <svg> root element"),
                _ => {}
            }
        }
    }
}

fn symbol_attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| anyhow!("bad attribute: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") || DROPPED_ATTRIBUTES.contains(&key.as_str())
        {
            continue;
        }
        let value = attr.unescape_value()?;
        out.push((key, escape(&*value).into_owned()));
    }
    Ok(out)
}

/// Stack `icons` into one document, one `<symbol>` per icon, in the given
/// order.
pub fn pack_sprite(icons: &[Icon]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
    );

    for icon in icons {
        out.push_str("<symbol id=\"");
        out.push_str(&escape(icon.id.as_str()));
        out.push('"');
        for (key, value) in &icon.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        out.push_str(&icon.body);
        out.push_str("</symbol>\n");
    }

    out.push_str("</svg>\n");
    out
}

/// Symbol ids in a packed sprite, in document order.
pub fn symbol_ids(sprite: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(sprite);
    let mut ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"symbol" => {
                if let Some(id) = e.try_get_attribute("id")? {
                    ids.push(id.unescape_value()?.into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

