use px_core::{Error, PubmedRecord, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Abstract,
}

struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// Parses an efetch `PubmedArticleSet` document.
///
/// Only `MedlineCitation/PMID`, `Article/ArticleTitle` and the first
/// `Abstract/AbstractText` of each `PubmedArticle` are read. Text of inline
/// markup nested in those elements is kept, whitespace is collapsed, and
/// blank elements come back as `None`.
pub fn parse_efetch_xml(xml: &str) -> Result<Vec<PubmedRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<PubmedRecord> = None;
    let mut abstract_seen = false;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                if name == b"PubmedArticle" {
                    current = Some(PubmedRecord::default());
                    abstract_seen = false;
                } else if capture.is_none() {
                    if let Some(record) = current.as_ref() {
                        let parent = stack.last().map(Vec::as_slice);
                        if let Some(field) = target_field(&name, parent, record, abstract_seen) {
                            if field == Field::Abstract {
                                abstract_seen = true;
                            }
                            capture = Some(Capture {
                                field,
                                depth: stack.len(),
                                text: String::new(),
                            });
                        }
                    }
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                // <AbstractText/> still counts as the first abstract segment
                if let Some(record) = current.as_ref() {
                    let parent = stack.last().map(Vec::as_slice);
                    if capture.is_none()
                        && target_field(e.name().as_ref(), parent, record, abstract_seen)
                            == Some(Field::Abstract)
                    {
                        abstract_seen = true;
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(capture) = capture.as_mut() {
                    let text = e
                        .unescape()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                    capture.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                stack.pop();
                if capture.as_ref().map(|c| c.depth) == Some(stack.len()) {
                    if let (Some(done), Some(record)) = (capture.take(), current.as_mut()) {
                        let value = normalize(&done.text);
                        match done.field {
                            Field::Pmid => record.pmid = value,
                            Field::Title => record.title = value,
                            Field::Abstract => record.abstract_text = value,
                        }
                    }
                }
                if e.name().as_ref() == b"PubmedArticle" {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Fetch(format!(
                    "Malformed efetch XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(records)
}

fn target_field(
    name: &[u8],
    parent: Option<&[u8]>,
    record: &PubmedRecord,
    abstract_seen: bool,
) -> Option<Field> {
    match (name, parent) {
        (b"PMID", Some(b"MedlineCitation")) if record.pmid.is_none() => Some(Field::Pmid),
        (b"ArticleTitle", Some(b"Article")) if record.title.is_none() => Some(Field::Title),
        (b"AbstractText", Some(b"Abstract")) if !abstract_seen => Some(Field::Abstract),
        _ => None,
    }
}

fn normalize(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
