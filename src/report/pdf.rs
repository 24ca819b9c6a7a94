//! PDF rendering of a [`ReportLayout`] with printpdf

use super::layout::{wrap, Block, ReportLayout, Rgb, PARAGRAPH_WIDTH};
use crate::error::{HeartError, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect,
};
use tracing::debug;

// US Letter
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 20.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const VALUE_COLUMN: f32 = MARGIN + 55.0;

fn report_err(e: impl std::fmt::Display) -> HeartError {
    HeartError::ReportError(e.to_string())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.0, rgb.1, rgb.2, None))
}

/// Cursor over a multi-page document, top to bottom
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(report_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(report_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    /// Start a new page when `height` does not fit below the cursor
    fn reserve(&mut self, height: f32) {
        if self.y - height >= MARGIN {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn rect(&self, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        self.layer.set_fill_color(color(fill));
        self.layer
            .add_rect(Rect::new(Mm(x), Mm(y), Mm(x + width), Mm(y + height)));
    }

    fn draw(&mut self, block: &Block) {
        self.reserve(block.height());
        self.layer.set_fill_color(color(Rgb::TEXT));

        match block {
            Block::Title(title) => {
                self.text(title, 22.0, MARGIN, self.y - 9.0, true);
            }
            Block::AccentBar => {
                self.rect(MARGIN, self.y - 4.0, CONTENT_WIDTH, 2.0, Rgb::ACCENT);
            }
            Block::Table(rows) => {
                let mut y = self.y - 6.0;
                for (label, value) in rows {
                    self.text(label, 11.0, MARGIN, y, true);
                    self.text(value, 11.0, VALUE_COLUMN, y, false);
                    y -= 7.0;
                }
            }
            Block::RiskMeter { score, color: fill } => {
                self.text(&format!("Risk score: {}%", score), 11.0, MARGIN, self.y - 5.0, true);
                let bar_y = self.y - 13.0;
                self.rect(MARGIN, bar_y, CONTENT_WIDTH, 5.0, Rgb::TRACK);
                let filled = CONTENT_WIDTH * f32::from(*score) / 100.0;
                self.rect(MARGIN, bar_y, filled, 5.0, *fill);
            }
            Block::Paragraph(text) => {
                let mut y = self.y - 5.0;
                for line in wrap(text, PARAGRAPH_WIDTH) {
                    self.text(&line, 10.0, MARGIN, y, false);
                    y -= 5.5;
                }
            }
            Block::Verdict { text, color: fill } => {
                self.layer.set_fill_color(color(*fill));
                self.text(text, 16.0, MARGIN, self.y - 8.0, true);
            }
            Block::Heading(text) => {
                self.text(text, 14.0, MARGIN, self.y - 7.0, true);
            }
            Block::Bullets(items) => {
                let mut y = self.y - 5.0;
                for item in items {
                    self.text(&format!("- {}", item), 11.0, MARGIN + 4.0, y, false);
                    y -= 6.5;
                }
            }
        }

        self.y -= block.height();
    }

    fn finish(self) -> Result<(Vec<u8>, usize)> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes().map_err(report_err)?;
        Ok((bytes, pages))
    }
}

/// A rendered document and the number of pages it spans
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Render the layout, breaking onto new pages as blocks overflow
pub fn render_pdf(layout: &ReportLayout) -> Result<RenderedPdf> {
    let mut writer = PageWriter::new(super::layout::REPORT_TITLE)?;
    for block in &layout.blocks {
        writer.draw(block);
    }
    let (bytes, pages) = writer.finish()?;
    debug!(bytes = bytes.len(), pages, "Rendered PDF report");
    Ok(RenderedPdf { bytes, pages })
}

/// Render the layout to PDF bytes
pub fn render_layout(layout: &ReportLayout) -> Result<Vec<u8>> {
    Ok(render_pdf(layout)?.bytes)
}
