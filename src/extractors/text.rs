//! Page-level text extraction from tokenized content stream operators.
//!
//! [`TextExtractor`] executes the text operators of one page in order,
//! keeps the CTM, text matrix and font state current, and drives the
//! line/space heuristic and the decode/bidi engine. Operators that only
//! move the text position are followed by a layout check; showing
//! operators decode their strings first and are then checked as well, so
//! a `cm` between two strings is noticed too.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::content::matrix::Matrix;
use crate::content::operators::{Operator, TextElement};
use crate::error::{Error, Result};
use crate::fonts::CharMap;
use crate::text::bidi::{push_neutral, show_text, Operand};
use crate::text::layout::{check_line_break, LayoutAction, MatrixPair};
use crate::text::rtl::RtlConfig;
use crate::text::sink::{TextSink, TextVisitor};
use crate::text::state::TextState;

/// Source of character maps by font resource name.
///
/// Building character maps from font dictionaries is outside this crate;
/// implementations typically parse `/Encoding` and `/ToUnicode` once and
/// hand out shared maps.
pub trait CharMapResolver {
    /// Character map for the font resource `name` (e.g. `F1`).
    fn resolve(&self, name: &str) -> Option<Arc<CharMap>>;
}

impl CharMapResolver for HashMap<String, Arc<CharMap>> {
    fn resolve(&self, name: &str) -> Option<Arc<CharMap>> {
        self.get(name).cloned()
    }
}

/// Values saved by `q` and restored by `Q`.
#[derive(Debug, Clone)]
struct SavedState {
    ctm: Matrix,
    charmap: Arc<CharMap>,
    font_size: f64,
    char_scale: f64,
    word_scale: f64,
    raw_space_width: f64,
    leading: f64,
}

impl SavedState {
    fn capture(state: &TextState) -> Self {
        Self {
            ctm: state.ctm,
            charmap: Arc::clone(&state.charmap),
            font_size: state.font_size,
            char_scale: state.char_scale,
            word_scale: state.word_scale,
            raw_space_width: state.raw_space_width,
            leading: state.leading,
        }
    }

    fn restore(self, state: &mut TextState) {
        state.ctm = self.ctm;
        state.charmap = self.charmap;
        state.font_size = self.font_size;
        state.char_scale = self.char_scale;
        state.word_scale = self.word_scale;
        state.raw_space_width = self.raw_space_width;
        state.leading = self.leading;
    }
}

/// Reconstructs the text of one page from its operators.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use pdf_textflow::config::ExtractionConfig;
/// use pdf_textflow::content::Operator;
/// use pdf_textflow::extractors::TextExtractor;
/// use pdf_textflow::fonts::CharMap;
///
/// let fonts: HashMap<String, Arc<CharMap>> = HashMap::new();
/// let mut extractor = TextExtractor::new(&fonts, ExtractionConfig::default());
/// extractor.process(&Operator::BeginText)?;
/// extractor.process(&Operator::Td { tx: 72.0, ty: 700.0 })?;
/// extractor.process(&Operator::Tj { text: b"Hello".to_vec() })?;
/// extractor.process(&Operator::EndText)?;
/// assert_eq!(extractor.finish(), "Hello");
/// # Ok::<(), pdf_textflow::error::Error>(())
/// ```
pub struct TextExtractor<'a, R: CharMapResolver + ?Sized> {
    resolver: &'a R,
    config: ExtractionConfig,
    rtl: RtlConfig,
    state: TextState,
    line_matrix: Matrix,
    sink: TextSink<'a>,
    prev: MatrixPair,
    saved: Vec<SavedState>,
    cache: HashMap<String, Arc<CharMap>>,
}

impl<'a, R: CharMapResolver + ?Sized> TextExtractor<'a, R> {
    /// Create an extractor that only accumulates an output string.
    pub fn new(resolver: &'a R, config: ExtractionConfig) -> Self {
        Self::with_sink(resolver, config, TextSink::new())
    }

    /// Create an extractor that also delivers every flushed fragment to
    /// `visitor`.
    pub fn with_visitor(
        resolver: &'a R,
        config: ExtractionConfig,
        visitor: &'a mut (dyn TextVisitor + 'a),
    ) -> Self {
        Self::with_sink(resolver, config, TextSink::with_visitor(visitor))
    }

    fn with_sink(resolver: &'a R, config: ExtractionConfig, sink: TextSink<'a>) -> Self {
        let rtl = config.resolved_rtl();
        Self {
            resolver,
            config,
            rtl,
            state: TextState::default(),
            line_matrix: Matrix::identity(),
            sink,
            prev: MatrixPair::default(),
            saved: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Current text state.
    pub fn state(&self) -> &TextState {
        &self.state
    }

    /// Text of the run being assembled.
    pub fn pending(&self) -> &str {
        self.sink.pending()
    }

    /// Text flushed so far.
    pub fn output(&self) -> &str {
        self.sink.output()
    }

    /// Process a sequence of operators.
    pub fn process_all<'o>(&mut self, ops: impl IntoIterator<Item = &'o Operator>) -> Result<()> {
        for op in ops {
            self.process(op)?;
        }
        Ok(())
    }

    /// Execute one operator.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOperand`] for non-finite numeric operands, and decode
    /// errors from the text engine. Unsupported orientations and unknown
    /// fonts are logged and skipped.
    pub fn process(&mut self, op: &Operator) -> Result<()> {
        match op {
            Operator::BeginText => {
                self.flush_pending();
                self.state.text_matrix = Matrix::identity();
                self.line_matrix = Matrix::identity();
            },
            Operator::EndText => {
                self.flush_pending();
            },
            Operator::SaveState => {
                self.saved.push(SavedState::capture(&self.state));
            },
            Operator::RestoreState => match self.saved.pop() {
                Some(saved) => saved.restore(&mut self.state),
                None => log::warn!("Unbalanced Q operator ignored"),
            },
            Operator::Cm { a, b, c, d, e, f } => {
                let m = finite_matrix(op, [*a, *b, *c, *d, *e, *f])?;
                self.flush_pending();
                self.state.ctm = m.then(&self.state.ctm);
            },
            Operator::Tf { font, size } => {
                finite(op, &[*size])?;
                self.select_font(font, *size);
            },
            Operator::Tc { .. } => {
                // Glyph widths are not modelled; character spacing has no effect.
            },
            Operator::Tw { word_space } => {
                finite(op, &[*word_space])?;
                self.state.word_scale = 1.0 + word_space;
            },
            Operator::Tz { scale } => {
                finite(op, &[*scale])?;
                self.state.char_scale = scale / 100.0;
            },
            Operator::TL { leading } => {
                finite(op, &[*leading])?;
                self.state.leading = *leading;
            },
            Operator::Td { tx, ty } => {
                finite(op, &[*tx, *ty])?;
                self.move_line(*tx, *ty)?;
            },
            Operator::TD { tx, ty } => {
                finite(op, &[*tx, *ty])?;
                self.state.leading = -ty;
                self.move_line(*tx, *ty)?;
            },
            Operator::Tm { a, b, c, d, e, f } => {
                let m = finite_matrix(op, [*a, *b, *c, *d, *e, *f])?;
                self.line_matrix = m;
                self.state.text_matrix = m;
                self.check_layout()?;
            },
            Operator::TStar => {
                self.next_line()?;
            },
            Operator::Tj { text } => {
                self.show(Operand::Bytes(text), false)?;
            },
            Operator::Quote { text } => {
                self.next_line()?;
                self.show(Operand::Bytes(text), false)?;
            },
            Operator::DoubleQuote {
                word_space,
                char_space,
                text,
            } => {
                finite(op, &[*word_space, *char_space])?;
                self.state.word_scale = 1.0 + word_space;
                self.next_line()?;
                self.show(Operand::Bytes(text), false)?;
            },
            Operator::TJ { array } => {
                self.show_array(array)?;
            },
            Operator::Other { name } => {
                log::trace!("Ignoring operator {}", name);
            },
        }
        Ok(())
    }

    /// Flush remaining text and return the page output.
    pub fn finish(mut self) -> String {
        self.flush_pending();
        self.sink.into_output()
    }

    fn flush_pending(&mut self) {
        self.sink.flush("", &self.state);
    }

    fn resolve_font(&mut self, name: &str) -> Result<Arc<CharMap>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Arc::clone(cached));
        }
        let charmap = self
            .resolver
            .resolve(name)
            .ok_or_else(|| Error::UnknownFont(name.to_string()))?;
        self.cache.insert(name.to_string(), Arc::clone(&charmap));
        Ok(charmap)
    }

    fn select_font(&mut self, name: &str, size: f64) {
        if !self.sink.pending().is_empty() {
            self.flush_pending();
        }
        match self.resolve_font(name) {
            Ok(charmap) => self.state.set_font(charmap, size),
            Err(e) => {
                log::warn!("{}; keeping font {}", e, self.state.charmap);
                self.state.font_size = size;
            },
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) -> Result<()> {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.state.text_matrix = self.line_matrix;
        self.check_layout()
    }

    fn next_line(&mut self) -> Result<()> {
        let leading = self.state.leading;
        self.move_line(0.0, -leading)
    }

    fn show(&mut self, operand: Operand<'_>, in_array: bool) -> Result<()> {
        show_text(
            &mut self.sink,
            &mut self.state,
            operand,
            self.config.orientations,
            &self.rtl,
            in_array,
        )?;
        // Showing text never moves the text matrix, so there is no layout to check.
        Ok(())
    }

    fn show_array(&mut self, array: &[TextElement]) -> Result<()> {
        self.state.reset_offset();
        for element in array {
            match element {
                TextElement::String(bytes) => self.show(Operand::Bytes(bytes), true)?,
                TextElement::Offset(adjustment) => self.adjust_in_array(*adjustment),
            }
        }
        self.state.reset_offset();
        Ok(())
    }

    /// A TJ adjustment at least one space glyph wide separates words.
    fn adjust_in_array(&mut self, adjustment: f64) {
        if !self.config.tj_space_insertion
            || !self.config.orientations.accepts(self.state.orientation())
            || adjustment.abs() < self.state.raw_space_width
        {
            return;
        }
        let last = self.sink.pending().chars().next_back();
        if matches!(last, Some(ch) if ch != ' ') {
            push_neutral(&mut self.sink, &self.state, " ");
        }
    }

    fn check_layout(&mut self) -> Result<()> {
        match check_line_break(
            &mut self.sink,
            &self.state,
            &self.prev,
            self.config.orientations,
        ) {
            Ok((baseline, action)) => {
                if action != LayoutAction::None {
                    log::trace!("Layout check: {:?} at {:?}", action, self.state.origin());
                }
                self.prev = baseline;
                Ok(())
            },
            Err(Error::UnsupportedOrientation(orientation)) => {
                log::debug!("Skipping layout check for {} text", orientation);
                Ok(())
            },
            Err(e) => Err(e),
        }
    }
}

fn finite(op: &Operator, values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(bad) => Err(Error::InvalidOperand {
            operator: op.name().to_string(),
            reason: format!("non-finite number {}", bad),
        }),
        None => Ok(()),
    }
}

fn finite_matrix(op: &Operator, values: [f64; 6]) -> Result<Matrix> {
    finite(op, &values)?;
    Ok(Matrix::from(values))
}

/// Extract the text of one page.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use pdf_textflow::config::ExtractionConfig;
/// use pdf_textflow::content::Operator;
/// use pdf_textflow::extractors::extract_text;
/// use pdf_textflow::fonts::CharMap;
///
/// let fonts: HashMap<String, Arc<CharMap>> = HashMap::new();
/// let ops = vec![
///     Operator::BeginText,
///     Operator::Td { tx: 72.0, ty: 700.0 },
///     Operator::Tj { text: b"first".to_vec() },
///     Operator::Td { tx: 0.0, ty: -14.0 },
///     Operator::Tj { text: b"second".to_vec() },
///     Operator::EndText,
/// ];
/// let text = extract_text(&ops, &fonts, &ExtractionConfig::default())?;
/// assert_eq!(text, "first\nsecond");
/// # Ok::<(), pdf_textflow::error::Error>(())
/// ```
pub fn extract_text<R: CharMapResolver + ?Sized>(
    ops: &[Operator],
    resolver: &R,
    config: &ExtractionConfig,
) -> Result<String> {
    let mut extractor = TextExtractor::new(resolver, config.clone());
    extractor.process_all(ops)?;
    Ok(extractor.finish())
}

/// Extract the text of one page, delivering each flushed fragment to
/// `visitor` as well.
pub fn extract_text_with_visitor<R: CharMapResolver + ?Sized>(
    ops: &[Operator],
    resolver: &R,
    config: &ExtractionConfig,
    visitor: &mut dyn TextVisitor,
) -> Result<String> {
    let mut extractor = TextExtractor::with_visitor(resolver, config.clone(), visitor);
    extractor.process_all(ops)?;
    Ok(extractor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Orientations;
    use crate::fonts::NamedEncoding;
    use crate::text::sink::CollectingVisitor;

    fn fonts() -> HashMap<String, Arc<CharMap>> {
        let mut fonts = HashMap::new();
        fonts.insert(
            "F1".to_string(),
            Arc::new(
                CharMap::new(NamedEncoding::Latin1, HashMap::new(), "F1").with_space_width(250.0),
            ),
        );
        fonts.insert(
            "F2".to_string(),
            Arc::new(CharMap::new(NamedEncoding::Utf16Be, HashMap::new(), "F2")),
        );
        fonts
    }

    fn tj(text: &[u8]) -> Operator {
        Operator::Tj { text: text.to_vec() }
    }

    #[test]
    fn test_two_lines() {
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "F1".to_string(),
                size: 12.0,
            },
            Operator::Td { tx: 72.0, ty: 700.0 },
            tj(b"Hello"),
            Operator::Td { tx: 0.0, ty: -14.0 },
            tj(b"World"),
            Operator::EndText,
        ];
        let text = extract_text(&ops, &fonts(), &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn test_word_gap_on_same_line() {
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "F1".to_string(),
                size: 10.0,
            },
            Operator::Td { tx: 72.0, ty: 700.0 },
            tj(b"left"),
            Operator::Td { tx: 200.0, ty: 0.0 },
            tj(b"right"),
            Operator::EndText,
        ];
        let text = extract_text(&ops, &fonts(), &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "left right");
    }

    #[test]
    fn test_consecutive_shows_keep_baseline() {
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "F1".to_string(),
                size: 10.0,
            },
            Operator::Td { tx: 72.0, ty: 700.0 },
            tj(b"ab"),
            tj(b"cd"),
            Operator::TJ {
                array: vec![TextElement::String(b"ef".to_vec())],
            },
            Operator::Td { tx: 200.0, ty: 0.0 },
            tj(b"gh"),
            Operator::EndText,
        ];
        let text = extract_text(&ops, &fonts(), &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "abcdef gh");
    }

    #[test]
    fn test_tstar_uses_leading() {
        let ops = vec![
            Operator::BeginText,
            Operator::TL { leading: 14.0 },
            Operator::Td { tx: 72.0, ty: 700.0 },
            tj(b"a"),
            Operator::TStar,
            tj(b"b"),
            Operator::Quote { text: b"c".to_vec() },
            Operator::EndText,
        ];
        let text = extract_text(&ops, &fonts(), &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "a\nb\nc");
    }

    #[test]
    fn test_td_sets_leading() {
        let resolver = fonts();
        let mut extractor = TextExtractor::new(&resolver, ExtractionConfig::default());
        extractor.process(&Operator::TD { tx: 0.0, ty: -15.0 }).unwrap();
        assert_eq!(extractor.state().leading, 15.0);
    }

    #[test]
    fn test_tj_array_adjustment_space() {
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "F1".to_string(),
                size: 12.0,
            },
            Operator::TJ {
                array: vec![
                    TextElement::String(b"Hel".to_vec()),
                    TextElement::Offset(-20.0),
                    TextElement::String(b"lo".to_vec()),
                    TextElement::Offset(-300.0),
                    TextElement::String(b"there".to_vec()),
                ],
            },
            Operator::EndText,
        ];
        let text = extract_text(&ops, &fonts(), &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "Hello there");

        let config = ExtractionConfig::new().with_tj_space_insertion(false);
        let text = extract_text(&ops, &fonts(), &config).unwrap();
        assert_eq!(text, "Hellothere");
    }

    #[test]
    fn test_save_restore_font() {
        let resolver = fonts();
        let mut extractor = TextExtractor::new(&resolver, ExtractionConfig::default());
        let ops = vec![
            Operator::Tf {
                font: "F1".to_string(),
                size: 12.0,
            },
            Operator::SaveState,
            Operator::Tf {
                font: "F2".to_string(),
                size: 8.0,
            },
            Operator::Cm {
                a: 2.0,
                b: 0.0,
                c: 0.0,
                d: 2.0,
                e: 0.0,
                f: 0.0,
            },
        ];
        extractor.process_all(&ops).unwrap();
        assert_eq!(extractor.state().charmap.resource_name(), "F2");
        assert_eq!(extractor.state().ctm, Matrix::scaling(2.0, 2.0));

        extractor.process(&Operator::RestoreState).unwrap();
        assert_eq!(extractor.state().charmap.resource_name(), "F1");
        assert_eq!(extractor.state().font_size, 12.0);
        assert_eq!(extractor.state().ctm, Matrix::identity());

        // unbalanced Q is ignored
        extractor.process(&Operator::RestoreState).unwrap();
    }

    #[test]
    fn test_cm_is_premultiplied() {
        let resolver = fonts();
        let mut extractor = TextExtractor::new(&resolver, ExtractionConfig::default());
        extractor
            .process(&Operator::Cm {
                a: 1.0,
                b: 0.0,
                c: 0.0,
                d: 1.0,
                e: 100.0,
                f: 0.0,
            })
            .unwrap();
        extractor
            .process(&Operator::Cm {
                a: 2.0,
                b: 0.0,
                c: 0.0,
                d: 2.0,
                e: 0.0,
                f: 0.0,
            })
            .unwrap();
        // new cm applies before the existing CTM
        let ctm = extractor.state().ctm;
        assert_eq!(ctm.transform_point(1.0, 0.0).x, 102.0);
    }

    #[test]
    fn test_unknown_font_keeps_going() {
        let resolver = fonts();
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "Missing".to_string(),
                size: 9.0,
            },
            tj(b"still here"),
            Operator::EndText,
        ];
        let text = extract_text(&ops, &resolver, &ExtractionConfig::default()).unwrap();
        assert_eq!(text, "still here");
    }

    #[test]
    fn test_font_cache_used() {
        let resolver = fonts();
        let mut extractor = TextExtractor::new(&resolver, ExtractionConfig::default());
        let first = extractor.resolve_font("F1").unwrap();
        let second = extractor.resolve_font("F1").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(matches!(extractor.resolve_font("nope"), Err(Error::UnknownFont(_))));
    }

    #[test]
    fn test_non_finite_operand_rejected() {
        let resolver = fonts();
        let mut extractor = TextExtractor::new(&resolver, ExtractionConfig::default());
        let err = extractor
            .process(&Operator::Td {
                tx: f64::NAN,
                ty: 0.0,
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperand { .. }));
    }

    #[test]
    fn test_rotated_text_skipped_when_not_accepted() {
        let resolver = fonts();
        let ops = vec![
            Operator::BeginText,
            tj(b"up"),
            Operator::Tm {
                a: 0.0,
                b: 1.0,
                c: -1.0,
                d: 0.0,
                e: 300.0,
                f: 300.0,
            },
            tj(b"side"),
            Operator::EndText,
        ];
        let config = ExtractionConfig::new().with_orientations(Orientations::UPRIGHT);
        let text = extract_text(&ops, &resolver, &config).unwrap();
        assert_eq!(text, "up");

        let text = extract_text(&ops, &resolver, &ExtractionConfig::default()).unwrap();
        assert!(text.contains("side"));
    }

    #[test]
    fn test_visitor_sees_fragments_in_order() {
        let resolver = fonts();
        let ops = vec![
            Operator::BeginText,
            Operator::Tf {
                font: "F2".to_string(),
                size: 12.0,
            },
            Operator::Td { tx: 72.0, ty: 700.0 },
            tj(&[0x00, 0x41, 0x05, 0xD0, 0x05, 0xD1, 0x00, 0x42]),
            Operator::EndText,
        ];
        let mut collector = CollectingVisitor::new();
        let text = extract_text_with_visitor(
            &ops,
            &resolver,
            &ExtractionConfig::default(),
            &mut collector,
        )
        .unwrap();
        assert_eq!(text, "A\u{05D1}\u{05D0}B");
        // BT and the final flush deliver empty fragments
        assert_eq!(collector.texts(), vec!["", "A", "\u{05D1}\u{05D0}", "B", ""]);
        assert_eq!(collector.fragments[1].1.origin().y, 700.0);
    }
}
