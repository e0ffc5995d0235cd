//! Package-level XML parts: content types, relationships and workbook.xml.

use super::constants::{
    STYLES_PART, WORKBOOK_PART, XML_DECLARATION, content_type as ct, namespace,
    relationship_type as rt, worksheet_part,
};
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Generate `[Content_Types].xml` for `sheet_count` worksheets.
pub fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::with_capacity(512 + sheet_count * 160);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::CONTENT_TYPES);
    let _ = write!(
        xml,
        r#"<Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>"#,
        ct::OPC_RELATIONSHIPS,
        ct::XML
    );
    let _ = write!(
        xml,
        r#"<Override PartName="/{}" ContentType="{}"/>"#,
        WORKBOOK_PART,
        ct::SML_SHEET_MAIN
    );
    let _ = write!(
        xml,
        r#"<Override PartName="/{}" ContentType="{}"/>"#,
        STYLES_PART,
        ct::SML_STYLES
    );
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            worksheet_part(n),
            ct::SML_WORKSHEET
        );
    }
    xml.push_str("</Types>");
    xml
}

/// Generate `_rels/.rels`.
pub fn root_rels_xml() -> String {
    let mut xml = String::with_capacity(320);
    xml.push_str(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="{}"/></Relationships>"#,
        namespace::PACKAGE_RELATIONSHIPS,
        rt::OFFICE_DOCUMENT,
        WORKBOOK_PART
    );
    xml
}

/// Generate `xl/_rels/workbook.xml.rels`.
///
/// Worksheets take `rId1..=rIdN`; styles follow at `rId{N+1}`.
pub fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::with_capacity(256 + sheet_count * 160);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::PACKAGE_RELATIONSHIPS);
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="worksheets/sheet{}.xml"/>"#,
            n,
            rt::WORKSHEET,
            n
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{}" Target="styles.xml"/>"#,
        sheet_count + 1,
        rt::STYLES
    );
    xml.push_str("</Relationships>");
    xml
}

/// Generate `xl/workbook.xml` listing `sheet_names` in order.
pub fn workbook_xml<S: AsRef<str>>(sheet_names: &[S], date1904: bool) -> String {
    let mut xml = String::with_capacity(512 + sheet_names.len() * 96);
    xml.push_str(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<workbook xmlns="{}" xmlns:r="{}">"#,
        namespace::SML,
        namespace::OFFICE_RELATIONSHIPS
    );
    if date1904 {
        xml.push_str(r#"<workbookPr date1904="1"/>"#);
    }
    xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);
    xml.push_str("<sheets>");
    for (index, name) in sheet_names.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(name.as_ref()),
            index + 1,
            index + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}
