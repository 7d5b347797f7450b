use std::io::BufWriter;

use printpdf::{BuiltinFont, Color as PdfColor, IndirectFontRef, Mm, PdfDocument, Pt, Rgb};

use super::ReportError;
use super::fonts::Font;
use super::layout::{DocumentLayout, TITLE};

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

/// Draws a computed layout and returns the finished PDF bytes.
pub fn render_pdf(document: &DocumentLayout) -> Result<Vec<u8>, ReportError> {
    let width = mm(document.geometry.width);
    let height = mm(document.geometry.height);

    let (doc, first_page, first_layer) = PdfDocument::new(TITLE, width, height, "Page 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("font error: {e}")))?;

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(width, height, format!("Page {}", index + 1));
            doc.get_page(page_index).get_layer(layer_index)
        };

        for run in &page.runs {
            let font: &IndirectFontRef = match run.style.font {
                Font::Helvetica => &regular,
                Font::HelveticaBold => &bold,
            };
            let color = run.style.color;
            layer.set_fill_color(PdfColor::Rgb(Rgb::new(color.r, color.g, color.b, None)));
            layer.use_text(run.text.as_str(), run.style.size, mm(run.x), mm(run.y), font);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("buffer error: {e}")))
}
