//! The durable document: a `Contacts` root holding one `Contact` element per record.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Contacts>
//!   <Contact Id="1">
//!     <ContactName>Alice</ContactName>
//!     <Company>Acme</Company>
//!     <Phone>123-4567890</Phone>
//!   </Contact>
//! </Contacts>
//! ```

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;

use crate::domain::contact::{Contact, ContactFields};
use crate::errors::AppError;

pub const ROOT: &str = "Contacts";
pub const CONTACT: &str = "Contact";
pub const ID_ATTR: &str = "Id";
pub const NAME: &str = "ContactName";
pub const COMPANY: &str = "Company";
pub const PHONE: &str = "Phone";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsDocument {
    records: Vec<Contact>,
}

impl ContactsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Contact] {
        &self.records
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|c| c.id == id)
    }

    pub fn append(&mut self, contact: Contact) {
        self.records.push(contact);
    }

    pub fn set_fields(&mut self, id: &str, fields: ContactFields) -> Result<(), AppError> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.records[index].apply(fields);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Contact, AppError> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }

    pub fn parse(xml: &str) -> Result<Self, AppError> {
        let mut reader = Reader::from_str(xml);
        let mut records = Vec::new();

        // Prolog: declaration, comments and whitespace until the root element
        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) => {
                    expect_root(e.name())?;
                    break;
                }
                Event::Empty(e) => {
                    expect_root(e.name())?;
                    expect_epilogue(&mut reader)?;
                    return Ok(Self { records });
                }
                Event::Eof => {
                    return Err(AppError::StorageRead("document has no root element".to_string()));
                }
                _ => continue,
            }
        }

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) if e.name().as_ref() == CONTACT.as_bytes() => {
                    let id = read_id(&e)?;
                    records.push(read_contact(&mut reader, id)?);
                }
                Event::Empty(e) if e.name().as_ref() == CONTACT.as_bytes() => {
                    let id = read_id(&e)?;
                    return Err(AppError::StorageRead(format!(
                        "contact '{}' has no {} element",
                        id, NAME
                    )));
                }
                Event::Start(e) => {
                    let name = e.name().as_ref().to_vec();
                    reader.read_to_end(QName(&name)).map_err(malformed)?;
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(AppError::StorageRead(format!("unclosed <{}> element", ROOT)));
                }
                _ => continue,
            }
        }

        expect_epilogue(&mut reader)?;
        Ok(Self { records })
    }

    /// Renders the whole document. Identical records always produce identical bytes.
    pub fn to_xml(&self) -> Result<String, AppError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;

        if self.records.is_empty() {
            emit(&mut writer, Event::Empty(BytesStart::new(ROOT)))?;
        } else {
            emit(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
            for contact in &self.records {
                write_contact(&mut writer, contact)?;
            }
            emit(&mut writer, Event::End(BytesEnd::new(ROOT)))?;
        }

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}

impl From<Vec<Contact>> for ContactsDocument {
    fn from(records: Vec<Contact>) -> Self {
        Self { records }
    }
}

fn malformed(err: impl std::fmt::Display) -> AppError {
    AppError::StorageRead(err.to_string())
}

fn expect_root(name: QName<'_>) -> Result<(), AppError> {
    if name.as_ref() != ROOT.as_bytes() {
        return Err(AppError::StorageRead(format!(
            "expected <{}> root element, found <{}>",
            ROOT,
            String::from_utf8_lossy(name.as_ref())
        )));
    }
    Ok(())
}

/// After the root closes only whitespace, comments and processing instructions may follow.
fn expect_epilogue(reader: &mut Reader<&[u8]>) -> Result<(), AppError> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::PI(_) => continue,
            Event::Text(t) if t.iter().all(|b| b.is_ascii_whitespace()) => continue,
            _ => {
                return Err(AppError::StorageRead(format!(
                    "unexpected content after </{}>",
                    ROOT
                )));
            }
        }
    }
}

fn read_id(element: &BytesStart<'_>) -> Result<String, AppError> {
    let attr = element
        .try_get_attribute(ID_ATTR)
        .map_err(malformed)?
        .ok_or_else(|| {
            AppError::StorageRead(format!("<{}> element without {} attribute", CONTACT, ID_ATTR))
        })?;

    Ok(attr.unescape_value().map_err(malformed)?.into_owned())
}

fn read_contact(reader: &mut Reader<&[u8]>, id: String) -> Result<Contact, AppError> {
    let mut name = None;
    let mut company = None;
    let mut phone = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let tag = e.name().as_ref().to_vec();
                match tag.as_slice() {
                    t if t == NAME.as_bytes() => name = Some(read_text(reader, &tag)?),
                    t if t == COMPANY.as_bytes() => company = Some(read_text(reader, &tag)?),
                    t if t == PHONE.as_bytes() => phone = Some(read_text(reader, &tag)?),
                    _ => {
                        reader.read_to_end(QName(&tag)).map_err(malformed)?;
                    }
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                t if t == NAME.as_bytes() => name = Some(String::new()),
                t if t == COMPANY.as_bytes() => company = Some(String::new()),
                t if t == PHONE.as_bytes() => phone = Some(String::new()),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(AppError::StorageRead(format!("unclosed contact '{}'", id)));
            }
            _ => continue,
        }
    }

    let missing = |element: &str| {
        AppError::StorageRead(format!("contact '{}' has no {} element", id, element))
    };

    Ok(Contact {
        name: name.ok_or_else(|| missing(NAME))?,
        company: company.ok_or_else(|| missing(COMPANY))?,
        phone: phone.ok_or_else(|| missing(PHONE))?,
        id,
    })
}

fn read_text(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<String, AppError> {
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(malformed)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(_) => return Ok(text),
            Event::Start(_) | Event::Empty(_) => {
                return Err(AppError::StorageRead(format!(
                    "<{}> must contain text only",
                    String::from_utf8_lossy(tag)
                )));
            }
            Event::Eof => {
                return Err(AppError::StorageRead(format!(
                    "unclosed <{}> element",
                    String::from_utf8_lossy(tag)
                )));
            }
            _ => continue,
        }
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), AppError> {
    writer
        .write_event(event)
        .map_err(|e| AppError::StorageWrite(e.to_string()))
}

fn write_contact(writer: &mut Writer<Vec<u8>>, contact: &Contact) -> Result<(), AppError> {
    let mut start = BytesStart::new(CONTACT);
    start.push_attribute((ID_ATTR, contact.id.as_str()));
    emit(writer, Event::Start(start))?;

    for (tag, value) in [
        (NAME, &contact.name),
        (COMPANY, &contact.company),
        (PHONE, &contact.phone),
    ] {
        emit(writer, Event::Start(BytesStart::new(tag)))?;
        emit(writer, Event::Text(BytesText::new(value)))?;
        emit(writer, Event::End(BytesEnd::new(tag)))?;
    }

    emit(writer, Event::End(BytesEnd::new(CONTACT)))
}
