/// Section markers the assistant is asked to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Conditions,
    Advice,
    MedicineRecommendation,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Conditions,
        Section::Advice,
        Section::MedicineRecommendation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Conditions => "Conditions:",
            Section::Advice => "Advice:",
            Section::MedicineRecommendation => "Medicine Recommendation:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(Section),
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

/// Classifies one line of report text. Blank lines yield `None`.
///
/// Headings may arrive wrapped in markdown emphasis (`**Advice:**`,
/// `## Conditions:`); the decoration is dropped from the drawn text.
pub fn classify(line: &str) -> Option<ReportLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bare = trimmed
        .trim_start_matches(['#', '*'])
        .trim_end_matches('*')
        .trim();

    let heading = Section::ALL
        .into_iter()
        .find(|section| bare.starts_with(section.label()));

    Some(match heading {
        Some(section) => ReportLine {
            kind: LineKind::Heading(section),
            text: bare.replace("**", ""),
        },
        None => ReportLine {
            kind: LineKind::Body,
            text: trimmed.to_string(),
        },
    })
}

/// Splits report text into classified, non-blank lines.
pub fn classify_lines(text: &str) -> Vec<ReportLine> {
    text.lines().filter_map(classify).collect()
}
