use std::mem;

use super::classify::{LineKind, classify_lines};
use super::fonts::{Font, encodable, text_width};
use super::{PageGeometry, ReportError};

pub const TITLE: &str = "Healthcare Report";

/// Space between the title baseline and the first report line.
const TITLE_GAP: f32 = 30.0;
/// Added to the font size to get the advance between wrapped segments.
const LEADING: f32 = 4.0;
/// Extra space after every report line.
const LINE_GAP: f32 = 10.0;
const BODY_INDENT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl RunStyle {
    pub const TITLE: RunStyle = RunStyle {
        font: Font::HelveticaBold,
        size: 20.0,
        color: Color::rgb(0.2, 0.4, 0.6),
    };

    pub const HEADING: RunStyle = RunStyle {
        font: Font::HelveticaBold,
        size: 16.0,
        color: Color::rgb(0.4, 0.6, 0.8),
    };

    pub const BODY: RunStyle = RunStyle {
        font: Font::Helvetica,
        size: 12.0,
        color: Color::BLACK,
    };
}

/// One drawn line of text. `y` is the baseline, measured up from the page bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: RunStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<PlacedRun>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
}

/// Greedy word wrap measured in rendered width. Words are never split; a word
/// wider than `max_width` gets a segment of its own.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            segments.push(mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

struct Cursor {
    geometry: PageGeometry,
    finished: Vec<PageLayout>,
    page: PageLayout,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            finished: Vec::new(),
            page: PageLayout::default(),
            y: geometry.top(),
        }
    }

    fn write(&mut self, text: String, x: f32, style: RunStyle) {
        if self.y < self.geometry.margin {
            self.finished.push(mem::take(&mut self.page));
            self.y = self.geometry.top();
        }
        let y = self.y;
        self.page.runs.push(PlacedRun { text, x, y, style });
        self.y -= style.size + LEADING;
    }

    fn write_wrapped(&mut self, text: &str, x: f32, max_width: f32, style: RunStyle) {
        for segment in wrap(&encodable(text), style.font, style.size, max_width) {
            self.write(segment, x, style);
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.finished.push(self.page);
        self.finished
    }
}

/// Computes the page layout for `text`.
pub fn layout(text: &str, geometry: PageGeometry) -> Result<DocumentLayout, ReportError> {
    geometry.validate()?;

    let margin = geometry.margin;
    let max_width = geometry.usable_width();
    let mut cursor = Cursor::new(geometry);

    cursor.page.runs.push(PlacedRun {
        text: TITLE.to_string(),
        x: margin,
        y: geometry.top(),
        style: RunStyle::TITLE,
    });
    cursor.y = geometry.top() - TITLE_GAP;

    for line in classify_lines(text) {
        match line.kind {
            LineKind::Heading(_) => {
                cursor.write_wrapped(&line.text, margin, max_width, RunStyle::HEADING);
            }
            LineKind::Body => {
                cursor.write_wrapped(
                    &line.text,
                    margin + BODY_INDENT,
                    max_width - BODY_INDENT,
                    RunStyle::BODY,
                );
            }
        }
        cursor.y -= LINE_GAP;
    }

    Ok(DocumentLayout {
        geometry,
        pages: cursor.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_runs(doc: &DocumentLayout) -> Vec<&PlacedRun> {
        doc.pages
            .iter()
            .flat_map(|p| p.runs.iter())
            .filter(|r| r.style != RunStyle::TITLE)
            .collect()
    }

    #[test]
    fn test_wrap_short_text_is_single_segment() {
        assert_eq!(wrap("2. Hydrate", Font::Helvetica, 12.0, 492.0), vec!["2. Hydrate"]);
    }

    #[test]
    fn test_wrap_collapses_whitespace_and_drops_empty() {
        assert_eq!(wrap("  rest   well ", Font::Helvetica, 12.0, 492.0), vec!["rest well"]);
        assert!(wrap("   ", Font::Helvetica, 12.0, 492.0).is_empty());
    }

    #[test]
    fn test_wrap_respects_width_without_splitting_words() {
        let text = "Drink plenty of fluids, get adequate rest and monitor your temperature \
                    every four hours; seek medical attention if the fever persists beyond three days";
        let max_width = 200.0;
        let segments = wrap(text, Font::Helvetica, 12.0, max_width);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(text_width(segment, Font::Helvetica, 12.0) <= max_width, "{segment:?}");
        }
        assert_eq!(segments.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_oversized_word_stands_alone() {
        let long = "Pneumonoultramicroscopicsilicovolcanoconiosis";
        let segments = wrap(&format!("see {long} now"), Font::Helvetica, 12.0, 60.0);
        assert_eq!(segments, vec!["see", long, "now"]);
    }

    #[test]
    fn test_example_report_fits_one_page() {
        let text = "Conditions:\n- flu\n\nAdvice:\n1. Rest\n2. Hydrate";
        let doc = layout(text, PageGeometry::letter()).unwrap();

        assert_eq!(doc.pages.len(), 1);
        let runs = content_runs(&doc);
        assert_eq!(runs.len(), 5);

        let headings: Vec<_> = runs.iter().filter(|r| r.style == RunStyle::HEADING).collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "Conditions:");
        assert_eq!(headings[1].text, "Advice:");
        assert!(headings.iter().all(|r| r.x == 50.0));

        let body: Vec<_> = runs.iter().filter(|r| r.style == RunStyle::BODY).collect();
        assert_eq!(body.len(), 3);
        assert!(body.iter().all(|r| r.x == 70.0));
        assert_eq!(body[2].text, "2. Hydrate");
    }

    #[test]
    fn test_cursor_spacing() {
        let doc = layout("Conditions:\n- flu", PageGeometry::letter()).unwrap();
        let runs = &doc.pages[0].runs;

        assert_eq!(runs[0].text, TITLE);
        assert_eq!(runs[0].y, 742.0);
        assert_eq!(runs[1].y, 712.0);
        // heading advance (16 + 4) plus the line gap
        assert_eq!(runs[2].y, 712.0 - 20.0 - 10.0);
    }

    #[test]
    fn test_blank_lines_add_no_spacing() {
        let compact = layout("Advice:\n1. Rest", PageGeometry::letter()).unwrap();
        let spaced = layout("Advice:\n\n   \n\n1. Rest", PageGeometry::letter()).unwrap();
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_long_report_spans_pages_within_margins() {
        let geometry = PageGeometry::letter();
        let mut text = String::from("Advice:\n");
        for i in 1..=120 {
            text.push_str(&format!("{i}. Take it easy and drink water throughout the day\n"));
        }

        let doc = layout(&text, geometry).unwrap();
        assert!(doc.pages.len() > 1);

        for page in &doc.pages {
            assert!(!page.runs.is_empty());
            for run in &page.runs {
                assert!(run.y >= geometry.margin, "run below bottom margin: {run:?}");
                assert!(run.y <= geometry.top(), "run above top margin: {run:?}");
            }
            for pair in page.runs.windows(2) {
                assert!(pair[1].y < pair[0].y, "runs overlap or move up");
            }
        }

        assert_eq!(content_runs(&doc).len(), 121);
        // new pages restart at the top margin
        assert_eq!(doc.pages[1].runs[0].y, geometry.top());
    }

    #[test]
    fn test_body_segments_respect_indented_width() {
        let geometry = PageGeometry::letter();
        let sentence = "Paracetamol 500mg every six hours as needed for fever and aches. ".repeat(12);
        let doc = layout(&sentence, geometry).unwrap();

        let body = content_runs(&doc);
        assert!(body.len() > 1);
        for run in body {
            let width = text_width(&run.text, run.style.font, run.style.size);
            assert!(width <= geometry.usable_width() - BODY_INDENT);
        }
    }

    #[test]
    fn test_empty_text_yields_title_page() {
        let doc = layout("", PageGeometry::letter()).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].runs.len(), 1);
    }

    const LONG_HEADING: &str = "Medicine Recommendation: paracetamol for fever, cetirizine for a \
                                runny nose, oral rehydration salts after vomiting and throat \
                                lozenges for a sore throat";

    #[test]
    fn test_long_heading_wraps_at_heading_size() {
        let geometry = PageGeometry::letter();
        assert!(text_width(LONG_HEADING, Font::HelveticaBold, 16.0) > geometry.usable_width());

        let doc = layout(LONG_HEADING, geometry).unwrap();
        let runs = content_runs(&doc);
        let expected = wrap(LONG_HEADING, Font::HelveticaBold, 16.0, geometry.usable_width());

        assert!(expected.len() > 1);
        assert_eq!(runs.len(), expected.len());
        for (run, segment) in runs.iter().zip(&expected) {
            assert_eq!(run.style, RunStyle::HEADING);
            assert_eq!(run.x, geometry.margin);
            assert_eq!(&run.text, segment);
            assert!(text_width(&run.text, Font::HelveticaBold, 16.0) <= geometry.usable_width());
        }
        for pair in runs.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, 16.0 + LEADING);
        }
    }

    #[test]
    fn test_heading_after_full_page_starts_next_page() {
        let geometry = PageGeometry::letter();
        // 26 body lines advance 26pt each from 712 and leave the cursor at 36
        let mut text = "- rest\n".repeat(26);
        text.push_str(LONG_HEADING);

        let doc = layout(&text, geometry).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].runs.len(), 27);
        assert_eq!(doc.pages[0].runs[26].y, 62.0);

        let second = &doc.pages[1].runs;
        let expected = wrap(LONG_HEADING, Font::HelveticaBold, 16.0, geometry.usable_width());
        assert_eq!(second.len(), expected.len());
        assert_eq!(second[0].y, geometry.top());
        for run in second {
            assert_eq!(run.style, RunStyle::HEADING);
            assert!(text_width(&run.text, Font::HelveticaBold, 16.0) <= geometry.usable_width());
        }
    }

    #[test]
    fn test_bullets_drawn_as_hyphens() {
        let doc = layout("Advice:\n\u{2022} Caf\u{e9} rest\u{2019}s", PageGeometry::letter()).unwrap();
        let body: Vec<_> = content_runs(&doc)
            .into_iter()
            .filter(|r| r.style == RunStyle::BODY)
            .collect();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].text, "- Caf\u{e9} rest\u{2019}s");
    }
}
