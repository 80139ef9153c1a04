//! Background template pages and the overlay merge.
//!
//! A template is a PDF whose first page is the fixed background of every
//! report page. When rendering, that page is embedded once as a form XObject
//! and every output page draws it first, then its own text overlay on top.

use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::canvas::{Canvas, Font};
use super::{ReportError, ReportLayout, PAGE_HEIGHT, PAGE_WIDTH};

/// Resource name of the embedded background on output pages.
const TEMPLATE_XOBJECT: &str = "Tpl";

/// A loaded background template.
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    document: Document,
}

impl ReportTemplate {
    /// Load a template from PDF bytes. Only the first page is used.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        let document = Document::load_mem(bytes)?;
        if document.get_pages().is_empty() {
            return Err(ReportError::Template("template has no pages".into()));
        }
        Ok(Self { document })
    }

    /// Load a template from a PDF file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ReportError::Template(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Template drawn in code: title, header labels and the empty table grid.
    pub fn builtin(layout: &ReportLayout) -> Result<Self, ReportError> {
        let mut canvas = Canvas::new();
        layout.draw_background(&mut canvas);

        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let fonts = add_fonts(&mut document);
        let content_id = document.add_object(Stream::new(dictionary! {}, canvas.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box(),
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => fonts },
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1_i64,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Ok(Self { document })
    }

    /// Produce one output page per overlay, each drawn over the template page.
    ///
    /// Overlays are encoded content streams that may use the [`Font`]
    /// resources. Returns the serialized document.
    pub fn render(&self, overlays: Vec<Canvas>) -> Result<Vec<u8>, ReportError> {
        let mut document = self.document.clone();

        let first_page = document
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| ReportError::Template("template has no pages".into()))?;

        let background = document.get_page_content(first_page)?;
        let page_dict = document.get_object(first_page)?.as_dict()?.clone();
        let bbox = inherited(&document, &page_dict, b"MediaBox").unwrap_or_else(media_box);
        let resources = inherited(&document, &page_dict, b"Resources")
            .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

        let form_id = document.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => bbox.clone(),
                "Resources" => resources,
            },
            background,
        ));
        let fonts = add_fonts(&mut document);

        let pages_id = document.new_object_id();
        let mut kids = Vec::with_capacity(overlays.len());
        for overlay in overlays {
            let mut page = Canvas::new();
            page.form(TEMPLATE_XOBJECT);
            page.append(overlay);

            let content_id = document.add_object(Stream::new(dictionary! {}, page.encode()?));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => bbox.clone(),
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => fonts.clone(),
                    "XObject" => dictionary! { TEMPLATE_XOBJECT => form_id },
                },
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let root_id = document.trailer.get(b"Root")?.as_reference()?;
        document
            .get_object_mut(root_id)?
            .as_dict_mut()?
            .set("Pages", pages_id);
        document.prune_objects();

        let mut out = Vec::new();
        document.save_to(&mut out)?;
        Ok(out)
    }
}

fn media_box() -> Object {
    Object::Array(vec![
        0_i64.into(),
        0_i64.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ])
}

/// Register both report fonts and return the `/Font` resource dictionary.
fn add_fonts(document: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let id: ObjectId = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }
    fonts
}

/// Look up a page attribute, walking up the page tree for inheritable keys.
fn inherited(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    if let Ok(value) = page.get(key) {
        return Some(value.clone());
    }
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    while let Some(id) = parent {
        let node = document.get_object(id).and_then(Object::as_dict).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}
