//! Link annotation injection built on top of `lopdf`.
//!
//! `printpdf` 0.3 offers no annotation API, so link hotspots recorded during
//! painting are added in a post-pass over the serialized document: parse the
//! bytes, create one `/Link` annotation object per hotspot, attach it to the
//! page's `/Annots` array, and re-save.

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Errors that can occur while embedding link annotations into a rendered PDF
/// document.  The composer treats them as degraded-mode conditions, not as
/// render failures.
#[derive(Debug)]
pub enum LinkError {
    /// The PDF bytes could not be parsed by `lopdf`.
    Parse(lopdf::Error),
    /// A hotspot referred to a page the rendered document does not have.
    MissingPage {
        /// The requested (1-indexed) page number.
        page_number: usize,
    },
    /// The page object was not a dictionary.
    InvalidPage {
        page_number: usize,
    },
}

impl From<lopdf::Error> for LinkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to parse PDF bytes: {err}"),
            Self::MissingPage { page_number } => {
                write!(f, "Link refers to missing page {}", page_number)
            }
            Self::InvalidPage { page_number } => {
                write!(f, "Page {} is not a dictionary", page_number)
            }
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingPage { .. } | Self::InvalidPage { .. } => None,
        }
    }
}

/// One hotspot to annotate: a page, a rectangle in PDF points (bottom-up), and
/// the target URL.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLink {
    /// 1-indexed page number in the rendered document.
    pub page_number: usize,
    /// `[x1, y1, x2, y2]` in PDF points.
    pub rect_pt: [f64; 4],
    pub url: String,
}

/// Applies URI link annotations to the rendered bytes.
///
/// Returns the original bytes unchanged when `links` is empty.
pub fn apply_link_annotations(pdf_bytes: &[u8], links: &[PageLink]) -> Result<Vec<u8>, LinkError> {
    if links.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();

    for link in links {
        let page_ref = pages
            .get(&(link.page_number as u32))
            .copied()
            .ok_or(LinkError::MissingPage {
                page_number: link.page_number,
            })?;
        let annotation_id = insert_annotation(&mut document, link);
        attach_to_page(&mut document, page_ref, annotation_id, link.page_number)?;
    }

    let mut buffer = Vec::new();
    document.save_to(&mut buffer).map_err(LinkError::from)?;
    Ok(buffer)
}

fn insert_annotation(document: &mut Document, link: &PageLink) -> ObjectId {
    let mut action = Dictionary::new();
    action.set("Type", Object::Name("Action".into()));
    action.set("S", Object::Name("URI".into()));
    action.set("URI", Object::string_literal(link.url.as_str()));

    let mut annotation = Dictionary::new();
    annotation.set("Type", Object::Name("Annot".into()));
    annotation.set("Subtype", Object::Name("Link".into()));
    annotation.set(
        "Rect",
        Object::Array(link.rect_pt.iter().map(|v| Object::from(*v)).collect()),
    );
    annotation.set(
        "Border",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
        ]),
    );
    annotation.set("A", Object::Dictionary(action));

    let annotation_id = document.new_object_id();
    document
        .objects
        .insert(annotation_id, Object::Dictionary(annotation));
    annotation_id
}

fn attach_to_page(
    document: &mut Document,
    page_ref: ObjectId,
    annotation_id: ObjectId,
    page_number: usize,
) -> Result<(), LinkError> {
    let page = match document.objects.get_mut(&page_ref) {
        Some(Object::Dictionary(dict)) => dict,
        Some(_) => return Err(LinkError::InvalidPage { page_number }),
        None => return Err(LinkError::MissingPage { page_number }),
    };

    let mut annotations = match page.remove(b"Annots") {
        Some(Object::Array(existing)) => existing,
        _ => Vec::new(),
    };
    annotations.push(Object::Reference(annotation_id));
    page.set("Annots", Object::Array(annotations));
    Ok(())
}
