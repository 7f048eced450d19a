//! Word document report
//!
//! Writes a minimal WordprocessingML package: a heading, a summary section,
//! the top-causes chart and a short interpretation. The package is assembled
//! in memory with `zip`; nothing touches the filesystem.

use crate::analysis::{ParetoAnalysis, ReportSummary};
use crate::chart::RenderedChart;
use crate::config::ExportConfig;
use crate::error::{ParetoError, Result};
use std::io::Write;

/// English Metric Units per inch (OOXML drawing unit)
const EMU_PER_INCH: f64 = 914_400.0;

const IMAGE_PART: &str = "word/media/image1.png";
const IMAGE_REL_ID: &str = "rId2";

pub const INTERPRETATION: &str = "The top causes should be addressed first, \
because they generate most of the problem.";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="360" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="2E74B5"/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="2E74B5"/><w:sz w:val="26"/></w:rPr></w:style></w:styles>"#;

/// Build the `.docx` report in memory
pub fn build_document(
    analysis: &ParetoAnalysis,
    title: &str,
    top_chart: &RenderedChart,
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let document = document_xml(
        title,
        &analysis.summary(),
        top_chart,
        config.document_image_width_inches,
    );
    let core = core_properties_xml(title);

    let bytes = write_package(&document, &core, &top_chart.png)
        .map_err(|e| ParetoError::Export(format!("document: {}", e)))?;

    tracing::info!(
        top_count = analysis.top_count(),
        bytes = bytes.len(),
        "built document report"
    );
    Ok(bytes)
}

fn write_package(document: &str, core: &str, png: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut buffer = std::io::Cursor::new(Vec::new());

    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let parts: [(&str, &[u8]); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("docProps/core.xml", core.as_bytes()),
            ("word/document.xml", document.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            (IMAGE_PART, png),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content)?;
        }

        zip.finish()?;
    }

    Ok(buffer.into_inner())
}

/// Escape XML special characters in text content
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(text)
    )
}

fn heading(text: &str, level: u8) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading{}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        level,
        escape_xml(text)
    )
}

fn picture(chart: &RenderedChart, width_inches: f64) -> String {
    let cx = (width_inches * EMU_PER_INCH).round() as u64;
    let cy = (cx as f64 * chart.height as f64 / chart.width.max(1) as f64).round() as u64;
    format!(
        concat!(
            r#"<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="1" name="Top causes chart"/>"#,
            r#"<a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="image1.png"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        ),
        cx = cx,
        cy = cy,
        rel = IMAGE_REL_ID,
    )
}

/// Summary lines shown under the "Summary" heading
pub fn summary_lines(summary: &ReportSummary) -> [String; 3] {
    [
        format!("- Total number of causes: {}", summary.total_causes),
        format!("- Top causes: {}", summary.top_count),
        format!(
            "- They cover {:.1}% of occurrences",
            summary.coverage_percent
        ),
    ]
}

fn document_xml(
    title: &str,
    summary: &ReportSummary,
    chart: &RenderedChart,
    width_inches: f64,
) -> String {
    let mut body = String::new();
    body.push_str(&heading(&format!("Pareto analysis report – {}", title), 1));
    body.push_str(&heading("1. Summary", 2));
    for line in summary_lines(summary) {
        body.push_str(&paragraph(&line));
    }
    body.push_str(&heading("2. Top causes chart", 2));
    body.push_str(&picture(chart, width_inches));
    body.push_str(&heading("3. Interpretation", 2));
    body.push_str(&paragraph(INTERPRETATION));

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing">"#,
            r#"<w:body>{}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
            r#"</w:sectPr></w:body></w:document>"#,
        ),
        body
    )
}

fn core_properties_xml(title: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            r#"<dc:title>{}</dc:title><dc:creator>pareto</dc:creator></cp:coreProperties>"#,
        ),
        escape_xml(title)
    )
}
