// File: src/pdf.rs
// Purpose: PDF backend contract consumed by View::output

/// External PDF rendering collaborator.
///
/// Accepts raw CSS and HTML fragments incrementally and produces the
/// final document bytes. Availability is optional; `View::output` probes
/// for a backend at render time and emits HTML when none is supplied.
pub trait PdfBackend {
    /// Feeds a stylesheet's text into the document
    fn write_css(&mut self, css: &str);

    /// Feeds an HTML fragment into the document
    fn write_html(&mut self, html: &str);

    /// Finalizes and returns the document bytes
    fn finish(&mut self) -> Vec<u8>;
}
